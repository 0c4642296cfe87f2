use crate::{prelude::*, Client};

const E_P_URL: &str = const_format::concatcp!(crate::V2_PREFIX, "/account");
const FLAGS: EndpointFlags = EndpointFlags::NONE.authenticated().checked();

/// needs an api key with the `account` permission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    /// seconds played on this account
    pub age: Option<u64>,
    pub world: u32,
    #[serde(default)]
    pub guilds: Vec<String>,
    #[serde(default)]
    pub access: Vec<String>,
    pub created: String,
    #[serde(default)]
    pub commander: bool,
}

impl Client {
    pub fn account(&self) -> Endpoint<Account> {
        self.endpoint(E_P_URL, FLAGS)
    }
}
