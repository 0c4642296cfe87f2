use crate::{prelude::*, Client};

pub type ColorId = u32;
const E_P_URL: &str = const_format::concatcp!(crate::V2_PREFIX, "/colors");
const FLAGS: EndpointFlags = EndpointFlags::NONE
    .paginated()
    .bulk()
    .bulk_all()
    .localized()
    .checked();

/// a dye. missing material blocks decode to their defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Color {
    pub id: ColorId,
    pub name: String,
    pub base_rgb: [u8; 3],
    pub cloth: ColorDetailedInfoObject,
    pub leather: ColorDetailedInfoObject,
    pub metal: ColorDetailedInfoObject,
    pub fur: Option<ColorDetailedInfoObject>,
    pub item: Option<u32>,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorDetailedInfoObject {
    pub brightness: i32,
    pub contrast: f32,
    pub hue: u32,
    pub saturation: f32,
    pub lightness: f32,
    pub rgb: [u8; 3],
}

impl Client {
    pub fn colors(&self) -> Endpoint<Color> {
        self.endpoint(E_P_URL, FLAGS)
    }
}
