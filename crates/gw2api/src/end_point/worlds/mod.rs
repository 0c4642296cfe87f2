use crate::{prelude::*, Client};

pub type WorldId = u32;
const E_P_URL: &str = const_format::concatcp!(crate::V2_PREFIX, "/worlds");
const FLAGS: EndpointFlags = EndpointFlags::NONE
    .paginated()
    .bulk()
    .bulk_all()
    .localized()
    .checked();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    pub id: WorldId,
    pub name: String,
    /// `Low`, `Medium`, `High`, `VeryHigh` or `Full`
    pub population: String,
}

impl Client {
    pub fn worlds(&self) -> Endpoint<World> {
        self.endpoint(E_P_URL, FLAGS)
    }
}
