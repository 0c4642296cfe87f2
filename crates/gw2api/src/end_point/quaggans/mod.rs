use crate::{prelude::*, Client};

pub type QuagganId = String;
const E_P_URL: &str = const_format::concatcp!(crate::V2_PREFIX, "/quaggans");
const FLAGS: EndpointFlags = EndpointFlags::NONE
    .paginated()
    .bulk()
    .bulk_all()
    .checked();

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quaggan {
    pub id: QuagganId,
    pub url: Url,
}

impl Client {
    pub fn quaggans(&self) -> Endpoint<Quaggan> {
        self.endpoint(E_P_URL, FLAGS)
    }
}
