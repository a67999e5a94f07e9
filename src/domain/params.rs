//! Per-operation parameter records
//!
//! Each DAS method has an inbound `*Input` shape holding the raw JSON fields the
//! HTTP route accepts, and an outbound record that only carries the fields the
//! caller actually supplied. [`DasRequest::from_input`] is the normalizer between
//! the two.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::domain::utils::{
    clamped_limit, flag, id_list, nonzero_number, number, opaque, required_text, text,
    MAX_SIGNATURES_LIMIT,
};
use crate::errors::ValidationError;

pub trait DasRequest: Serialize + Sized + Send + Sync {
    /// Remote JSON-RPC method name.
    const METHOD: &'static str;
    /// Message returned to clients when the remote call fails.
    const FAILURE_MESSAGE: &'static str;

    type Input: DeserializeOwned + Send;

    fn from_input(input: Self::Input) -> Result<Self, ValidationError>;
}

const ASSET_ID_REQUIRED: &str = "Asset id is required";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetIdInput {
    pub id: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetIdsInput {
    pub asset_ids: Option<Value>,
}

/// Sorting and paging fields shared by the listing queries.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingInput {
    pub sort_by: Option<Value>,
    pub limit: Option<Value>,
    pub page: Option<Value>,
    pub before: Option<Value>,
    pub after: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl ListingInput {
    pub fn normalize(self) -> Result<Listing, ValidationError> {
        Ok(Listing {
            sort_by: opaque(self.sort_by),
            limit: nonzero_number("limit", self.limit)?,
            page: nonzero_number("page", self.page)?,
            before: text("before", self.before)?,
            after: text("after", self.after)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetById {
    pub id: String,
}

impl DasRequest for AssetById {
    const METHOD: &'static str = "getAsset";
    const FAILURE_MESSAGE: &'static str = "Failed to fetch asset details";
    type Input = AssetIdInput;

    fn from_input(input: AssetIdInput) -> Result<Self, ValidationError> {
        Ok(Self {
            id: required_text("id", input.id, ASSET_ID_REQUIRED)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetProof {
    pub id: String,
}

impl DasRequest for AssetProof {
    const METHOD: &'static str = "getAssetProof";
    const FAILURE_MESSAGE: &'static str = "Failed to fetch asset proof";
    type Input = AssetIdInput;

    fn from_input(input: AssetIdInput) -> Result<Self, ValidationError> {
        Ok(Self {
            id: required_text("id", input.id, ASSET_ID_REQUIRED)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetBatch {
    pub ids: Vec<String>,
}

impl DasRequest for AssetBatch {
    const METHOD: &'static str = "getAssetBatch";
    const FAILURE_MESSAGE: &'static str = "Failed to fetch assets batch";
    type Input = AssetIdsInput;

    fn from_input(input: AssetIdsInput) -> Result<Self, ValidationError> {
        Ok(Self {
            ids: id_list("assetIds", input.asset_ids)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetProofBatch {
    pub ids: Vec<String>,
}

impl DasRequest for AssetProofBatch {
    const METHOD: &'static str = "getAssetProofBatch";
    const FAILURE_MESSAGE: &'static str = "Failed to fetch asset proofs batch";
    type Input = AssetIdsInput;

    fn from_input(input: AssetIdsInput) -> Result<Self, ValidationError> {
        Ok(Self {
            ids: id_list("assetIds", input.asset_ids)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsByOwnerInput {
    pub owner_address: Option<Value>,
    #[serde(flatten)]
    pub listing: ListingInput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsByOwner {
    pub owner_address: String,
    #[serde(flatten)]
    pub listing: Listing,
}

impl DasRequest for AssetsByOwner {
    const METHOD: &'static str = "getAssetsByOwner";
    const FAILURE_MESSAGE: &'static str = "Failed to fetch assets by owner";
    type Input = AssetsByOwnerInput;

    fn from_input(input: AssetsByOwnerInput) -> Result<Self, ValidationError> {
        Ok(Self {
            owner_address: required_text(
                "ownerAddress",
                input.owner_address,
                "ownerAddress is required",
            )?,
            listing: input.listing.normalize()?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsByAuthorityInput {
    pub authority_address: Option<Value>,
    #[serde(flatten)]
    pub listing: ListingInput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsByAuthority {
    pub authority_address: String,
    #[serde(flatten)]
    pub listing: Listing,
}

impl DasRequest for AssetsByAuthority {
    const METHOD: &'static str = "getAssetsByAuthority";
    const FAILURE_MESSAGE: &'static str = "Failed to fetch assets by authority";
    type Input = AssetsByAuthorityInput;

    fn from_input(input: AssetsByAuthorityInput) -> Result<Self, ValidationError> {
        Ok(Self {
            authority_address: required_text(
                "authorityAddress",
                input.authority_address,
                "authorityAddress is required",
            )?,
            listing: input.listing.normalize()?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsByGroupInput {
    pub group_key: Option<Value>,
    pub group_value: Option<Value>,
    #[serde(flatten)]
    pub listing: ListingInput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsByGroup {
    pub group_key: String,
    pub group_value: String,
    #[serde(flatten)]
    pub listing: Listing,
}

impl DasRequest for AssetsByGroup {
    const METHOD: &'static str = "getAssetsByGroup";
    const FAILURE_MESSAGE: &'static str = "Failed to fetch assets by group";
    type Input = AssetsByGroupInput;

    fn from_input(input: AssetsByGroupInput) -> Result<Self, ValidationError> {
        const REQUIRED: &str = "groupKey and groupValue are required";

        Ok(Self {
            group_key: required_text("groupKey", input.group_key, REQUIRED)?,
            group_value: required_text("groupValue", input.group_value, REQUIRED)?,
            listing: input.listing.normalize()?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsByCreatorInput {
    pub creator_address: Option<Value>,
    pub only_verified: Option<Value>,
    #[serde(flatten)]
    pub listing: ListingInput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsByCreator {
    pub creator_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_verified: Option<bool>,
    #[serde(flatten)]
    pub listing: Listing,
}

impl DasRequest for AssetsByCreator {
    const METHOD: &'static str = "getAssetsByCreator";
    const FAILURE_MESSAGE: &'static str = "Failed to fetch assets by creator";
    type Input = AssetsByCreatorInput;

    fn from_input(input: AssetsByCreatorInput) -> Result<Self, ValidationError> {
        Ok(Self {
            creator_address: required_text(
                "creatorAddress",
                input.creator_address,
                "creator address is required",
            )?,
            only_verified: flag("onlyVerified", input.only_verified)?,
            listing: input.listing.normalize()?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignaturesForAssetInput {
    pub id: Option<Value>,
    pub page: Option<Value>,
    pub limit: Option<Value>,
    pub before: Option<Value>,
    pub after: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignaturesForAsset {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl DasRequest for SignaturesForAsset {
    const METHOD: &'static str = "getSignaturesForAsset";
    const FAILURE_MESSAGE: &'static str = "Failed to fetch signatures for asset";
    type Input = SignaturesForAssetInput;

    fn from_input(input: SignaturesForAssetInput) -> Result<Self, ValidationError> {
        Ok(Self {
            id: required_text("id", input.id, ASSET_ID_REQUIRED)?,
            page: nonzero_number("page", input.page)?,
            limit: clamped_limit("limit", input.limit, MAX_SIGNATURES_LIMIT)?,
            before: text("before", input.before)?,
            after: text("after", input.after)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccountsInput {
    pub mint: Option<Value>,
    pub owner: Option<Value>,
    pub limit: Option<Value>,
    pub page: Option<Value>,
    pub cursor: Option<Value>,
    pub before: Option<Value>,
    pub after: Option<Value>,
    pub show_zero_balance: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccounts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_zero_balance: Option<bool>,
}

impl DasRequest for TokenAccounts {
    const METHOD: &'static str = "getTokenAccounts";
    const FAILURE_MESSAGE: &'static str = "Failed to fetch token accounts";
    type Input = TokenAccountsInput;

    fn from_input(input: TokenAccountsInput) -> Result<Self, ValidationError> {
        let mint = text("mint", input.mint)?;
        let owner = text("owner", input.owner)?;
        if mint.is_none() && owner.is_none() {
            return Err(ValidationError::MissingParameter(
                "Either mint or owner address is required",
            ));
        }

        Ok(Self {
            mint,
            owner,
            limit: nonzero_number("limit", input.limit)?,
            page: nonzero_number("page", input.page)?,
            cursor: text("cursor", input.cursor)?,
            before: text("before", input.before)?,
            after: text("after", input.after)?,
            show_zero_balance: flag("showZeroBalance", input.show_zero_balance)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAssetsInput {
    pub negate: Option<Value>,
    pub interface: Option<Value>,
    pub owner_address: Option<Value>,
    pub owner_type: Option<Value>,
    pub creator_address: Option<Value>,
    pub creator_verified: Option<Value>,
    pub authority_address: Option<Value>,
    pub grouping: Option<Value>,
    pub delegate: Option<Value>,
    pub frozen: Option<Value>,
    pub supply: Option<Value>,
    pub supply_mint: Option<Value>,
    pub compressed: Option<Value>,
    pub compressible: Option<Value>,
    pub royalty_target_type: Option<Value>,
    pub burnt: Option<Value>,
    pub json_uri: Option<Value>,
    #[serde(flatten)]
    pub listing: ListingInput,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAssets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frozen: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supply: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supply_mint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compressed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compressible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub royalty_target_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burnt: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_uri: Option<String>,
    #[serde(flatten)]
    pub listing: Listing,
}

impl DasRequest for SearchAssets {
    const METHOD: &'static str = "searchAssets";
    const FAILURE_MESSAGE: &'static str = "Failed to search assets";
    type Input = SearchAssetsInput;

    fn from_input(input: SearchAssetsInput) -> Result<Self, ValidationError> {
        Ok(Self {
            negate: flag("negate", input.negate)?,
            interface: text("interface", input.interface)?,
            owner_address: text("ownerAddress", input.owner_address)?,
            owner_type: text("ownerType", input.owner_type)?,
            creator_address: text("creatorAddress", input.creator_address)?,
            creator_verified: flag("creatorVerified", input.creator_verified)?,
            authority_address: text("authorityAddress", input.authority_address)?,
            grouping: opaque(input.grouping),
            delegate: text("delegate", input.delegate)?,
            frozen: flag("frozen", input.frozen)?,
            supply: number("supply", input.supply)?,
            supply_mint: text("supplyMint", input.supply_mint)?,
            compressed: flag("compressed", input.compressed)?,
            compressible: flag("compressible", input.compressible)?,
            royalty_target_type: text("royaltyTargetType", input.royalty_target_type)?,
            burnt: flag("burnt", input.burnt)?,
            json_uri: text("jsonUri", input.json_uri)?,
            listing: input.listing.normalize()?,
        })
    }
}
