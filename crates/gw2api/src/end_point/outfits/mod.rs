use super::items::ItemId;
use crate::{prelude::*, Client};

pub type OutfitId = u32;
const E_P_URL: &str = const_format::concatcp!(crate::V2_PREFIX, "/outfits");
const FLAGS: EndpointFlags = EndpointFlags::NONE
    .paginated()
    .bulk()
    .bulk_all()
    .localized()
    .checked();

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
    pub id: OutfitId,
    pub name: String,
    pub icon: Option<Url>,
    pub unlock_items: Option<Vec<ItemId>>,
}

impl Client {
    pub fn outfits(&self) -> Endpoint<Outfit> {
        self.endpoint(E_P_URL, FLAGS)
    }
}
