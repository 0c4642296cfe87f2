use crate::{prelude::*, Client};

pub type MiniId = u32;
const E_P_URL: &str = const_format::concatcp!(crate::V2_PREFIX, "/minis");
const FLAGS: EndpointFlags = EndpointFlags::NONE
    .paginated()
    .bulk()
    .bulk_all()
    .localized()
    .checked();

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mini {
    pub id: MiniId,
    pub name: String,
    pub icon: Url,
    pub order: u32,
    pub item_id: u32,
}

impl Client {
    pub fn minis(&self) -> Endpoint<Mini> {
        self.endpoint(E_P_URL, FLAGS)
    }
}
