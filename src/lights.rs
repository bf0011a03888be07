use serde::{Deserialize, Serialize};

/// Attributes of a light, as reported by the bridge.
///
/// A `Light` is a read-only snapshot taken at request time: the library
/// never mutates one locally. To change a light, send a
/// [`CommandLight`](crate::CommandLight) through
/// [`Bridge::set_light_state`](crate::Bridge::set_light_state) and fetch
/// again to observe the effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Light {
    #[serde(rename = "type")]
    pub light_type: String,
    pub name: String,
    pub modelid: String,
    pub manufacturername: String,
    pub uniqueid: String,
    pub swversion: String,
    pub state: LightState,
}

/// Current state of a light.
///
/// Color fields are optional because white-only bulbs do not report them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightState {
    pub on: bool,
    /// Brightness, 1-254.
    pub bri: u8,
    /// Hue, 1-65535.
    pub hue: Option<u16>,
    /// Saturation, 0-254.
    pub sat: Option<u8>,
    /// Coordinates of the color in CIE xy space.
    pub xy: Option<[f32; 2]>,
    /// Mired color temperature.
    pub ct: Option<u16>,
    /// "none" or "colorloop".
    pub effect: Option<String>,
    /// Alert mode.
    pub alert: Option<String>,
    /// Which of hs/xy/ct the light currently follows.
    pub colormode: Option<String>,
    pub reachable: bool,
}
