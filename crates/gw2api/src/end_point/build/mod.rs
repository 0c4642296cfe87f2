use crate::{prelude::*, Client};

const E_P_URL: &str = const_format::concatcp!(crate::V2_PREFIX, "/build");

/// current game build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub id: u32,
}

impl Client {
    pub fn build(&self) -> Endpoint<Build> {
        self.endpoint(E_P_URL, EndpointFlags::NONE)
    }
}
