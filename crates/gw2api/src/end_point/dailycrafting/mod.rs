use crate::{prelude::*, Client};

pub type DailycraftingRecipeId = String;
const E_P_URL: &str = const_format::concatcp!(crate::V2_PREFIX, "/dailycrafting");
const FLAGS: EndpointFlags = EndpointFlags::NONE
    .paginated()
    .bulk()
    .bulk_all()
    .checked();

/// time gated crafting recipe, like `"lump_of_mithrillium"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailycraftingRecipe {
    pub id: DailycraftingRecipeId,
}

impl Client {
    pub fn dailycrafting(&self) -> Endpoint<DailycraftingRecipe> {
        self.endpoint(E_P_URL, FLAGS)
    }
}
