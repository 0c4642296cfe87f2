use crate::{prelude::*, Client};

pub type ItemId = u32;
const E_P_URL: &str = const_format::concatcp!(crate::V2_PREFIX, "/items");
// too many items for `ids=all`
const FLAGS: EndpointFlags = EndpointFlags::NONE
    .paginated()
    .bulk()
    .localized()
    .checked();

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub id: ItemId,
    pub chat_link: String,
    pub name: String,
    pub icon: Option<Url>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub t: String,
    pub rarity: String,
    pub level: u32,
    pub vendor_value: u32,
    pub default_skin: Option<u32>,
    pub flags: Vec<String>,
    pub game_types: Vec<String>,
    pub restrictions: Vec<String>,
    pub upgrades_into: Option<Vec<ItemUpgrade>>,
    pub upgrades_from: Option<Vec<ItemUpgrade>>,
    /// shape depends on `type`
    pub details: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemUpgrade {
    pub upgrade: String,
    pub item_id: ItemId,
}

impl Client {
    pub fn items(&self) -> Endpoint<Item> {
        self.endpoint(E_P_URL, FLAGS)
    }
}
