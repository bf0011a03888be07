use crate::lights::Light;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Highest light index probed by a scan, unless overridden with
/// [`Bridge::with_scan_limit`].
pub const MAX_SCAN_INDEX: u32 = 100;

/// Error type the bridge reports for an index with no light behind it.
const ERR_RESOURCE_NOT_AVAILABLE: usize = 3;

/// A partial state change for one light.
///
/// Only the fields that were explicitly set are serialized, so the bridge
/// leaves every other attribute untouched. A default command serializes to
/// `{}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CommandLight {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    /// Brightness, 1-254.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri: Option<u8>,
    /// Hue, 1-65535.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<u16>,
    /// Saturation, 0-254.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sat: Option<u8>,
    /// Coordinates of the color in CIE xy space.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xy: Option<[f32; 2]>,
    /// Mired color temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ct: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    /// "none" or "colorloop".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transitiontime: Option<String>,
    /// Relative brightness change, -254 to 254.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri_inc: Option<i16>,
    /// Relative saturation change, -254 to 254.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sat_inc: Option<i16>,
    /// Relative hue change, -65534 to 65534.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue_inc: Option<i32>,
    /// Relative color temperature change, -65534 to 65534.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ct_inc: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xy_inc: Option<[f32; 2]>,
}

impl CommandLight {
    pub fn on(self) -> Self {
        Self {
            on: Some(true),
            ..self
        }
    }

    pub fn off(self) -> Self {
        Self {
            on: Some(false),
            ..self
        }
    }

    pub fn with_bri(self, bri: u8) -> Self {
        Self {
            bri: Some(bri),
            ..self
        }
    }

    pub fn with_hue(self, hue: u16) -> Self {
        Self {
            hue: Some(hue),
            ..self
        }
    }

    pub fn with_sat(self, sat: u8) -> Self {
        Self {
            sat: Some(sat),
            ..self
        }
    }

    pub fn with_xy(self, x: f32, y: f32) -> Self {
        Self {
            xy: Some([x, y]),
            ..self
        }
    }

    pub fn with_ct(self, ct: u16) -> Self {
        Self {
            ct: Some(ct),
            ..self
        }
    }

    pub fn with_alert(self, alert: impl Into<String>) -> Self {
        Self {
            alert: Some(alert.into()),
            ..self
        }
    }

    pub fn with_effect(self, effect: impl Into<String>) -> Self {
        Self {
            effect: Some(effect.into()),
            ..self
        }
    }

    pub fn with_transition_time(self, transitiontime: impl Into<String>) -> Self {
        Self {
            transitiontime: Some(transitiontime.into()),
            ..self
        }
    }

    pub fn with_bri_inc(self, bri_inc: i16) -> Self {
        Self {
            bri_inc: Some(bri_inc),
            ..self
        }
    }

    pub fn with_sat_inc(self, sat_inc: i16) -> Self {
        Self {
            sat_inc: Some(sat_inc),
            ..self
        }
    }

    pub fn with_hue_inc(self, hue_inc: i32) -> Self {
        Self {
            hue_inc: Some(hue_inc),
            ..self
        }
    }

    pub fn with_ct_inc(self, ct_inc: i32) -> Self {
        Self {
            ct_inc: Some(ct_inc),
            ..self
        }
    }

    pub fn with_xy_inc(self, x: f32, y: f32) -> Self {
        Self {
            xy_inc: Some([x, y]),
            ..self
        }
    }
}

/// A bridge whose username is not yet known.
#[derive(Debug, Clone)]
pub struct UnauthBridge {
    /// Host or host:port of the bridge.
    pub addr: String,
}

impl UnauthBridge {
    /// Consumes the bridge and returns a new one with a configured username.
    /// ### Example
    /// ```no_run
    /// let bridge = huelite::Bridge::for_ip([192u8, 168, 0, 4])
    ///     .with_user("rVV05G0i52vQMMLn6BK3dpr0F3uDiqtDjPLPK2uj");
    /// ```
    pub fn with_user(self, username: impl Into<String>) -> Bridge {
        Bridge {
            addr: self.addr,
            username: username.into(),
            scan_limit: MAX_SCAN_INDEX,
            client: reqwest::blocking::Client::new(),
        }
    }
}

/// The bridge is the central access point of the lamps in a Hue setup, and
/// also the central access point of this library.
#[derive(Debug, Clone)]
pub struct Bridge {
    /// Host or host:port of the bridge.
    pub addr: String,
    /// Username of the currently logged in user, used as a path segment of
    /// every request.
    pub username: String,
    scan_limit: u32,
    client: reqwest::blocking::Client,
}

impl Bridge {
    /// Create a bridge at this IP. Note that this function does not validate
    /// whether a bridge is really present at the IP-address.
    /// ### Example
    /// ```no_run
    /// let bridge = huelite::Bridge::for_ip([192u8, 168, 0, 4]);
    /// ```
    pub fn for_ip(ip: impl Into<std::net::IpAddr>) -> UnauthBridge {
        UnauthBridge {
            addr: ip.into().to_string(),
        }
    }

    /// Create a bridge at this address, given as host or host:port.
    /// ### Example
    /// ```no_run
    /// let bridge = huelite::Bridge::for_addr("192.168.0.4:8080");
    /// ```
    pub fn for_addr(addr: impl Into<String>) -> UnauthBridge {
        UnauthBridge { addr: addr.into() }
    }

    /// Caps how many light indices [`Bridge::get_all_lights`] probes before
    /// giving up on a bridge that never reports an end of the index range.
    /// Defaults to [`MAX_SCAN_INDEX`].
    pub fn with_scan_limit(self, scan_limit: u32) -> Bridge {
        Bridge { scan_limit, ..self }
    }

    fn url(&self, tail: impl std::fmt::Display) -> String {
        format!("http://{}/api/{}/{}", self.addr, self.username, tail)
    }

    /// Returns a vector of all lights that are registered at this `Bridge`,
    /// in ascending index order.
    ///
    /// Lights are discovered by probing `/lights/1`, `/lights/2`, ... with
    /// one blocking GET each, until the bridge reports that the index is not
    /// available or the scan limit is reached. A transport failure or an
    /// undecodable body for a single index is logged and skipped; it does
    /// not abort the scan.
    ///
    /// ### Example
    /// ```no_run
    /// let bridge = huelite::Bridge::for_ip([192u8, 168, 0, 4])
    ///    .with_user("rVV05G0i52vQMMLn6BK3dpr0F3uDiqtDjPLPK2uj");
    /// for light in &bridge.get_all_lights().unwrap() {
    ///     println!("{:?}", light);
    /// }
    /// ```
    pub fn get_all_lights(&self) -> crate::Result<Vec<Light>> {
        let mut lights = Vec::new();
        for index in 1..=self.scan_limit {
            let url = self.url(format_args!("lights/{index}"));
            let response = match self.client.get(&url).timeout(REQUEST_TIMEOUT).send() {
                Ok(response) => response,
                Err(e) => {
                    log::warn!("lights/{index}: transport error: {e}");
                    continue;
                }
            };
            let status = response.status();
            if status != reqwest::StatusCode::OK {
                log::warn!("lights/{index}: bridge status error {status}");
            }
            let body = match response.text() {
                Ok(body) => body,
                Err(e) => {
                    log::warn!("lights/{index}: could not read body: {e}");
                    continue;
                }
            };
            match serde_json::from_str::<LightResponse>(&body) {
                Ok(LightResponse::Light(light)) => lights.push(*light),
                Ok(LightResponse::Errors(errors)) => {
                    if errors
                        .iter()
                        .any(|e| e.error.r#type == ERR_RESOURCE_NOT_AVAILABLE)
                    {
                        // End of the populated index range.
                        log::debug!("{} lights found", lights.len());
                        break;
                    }
                    for BridgeError { error } in errors {
                        log::warn!(
                            "lights/{index}: bridge error {}: {}",
                            error.r#type,
                            error.description
                        );
                    }
                }
                Err(e) => {
                    // Undecodable bodies are skipped; the scan continues.
                    log::warn!("lights/{index}: undecodable body: {e}");
                }
            }
        }
        Ok(lights)
    }

    /// Returns the first light whose name equals `name` exactly.
    ///
    /// This re-runs a full scan on every call; nothing is cached.
    /// ### Example
    /// ```no_run
    /// let bridge = huelite::Bridge::for_ip([192u8, 168, 0, 4])
    ///    .with_user("rVV05G0i52vQMMLn6BK3dpr0F3uDiqtDjPLPK2uj");
    /// let light = bridge.get_light_by_name("Kitchen").unwrap();
    /// ```
    pub fn get_light_by_name(&self, name: &str) -> crate::Result<Light> {
        self.get_all_lights()?
            .into_iter()
            .find(|light| light.name == name)
            .ok_or_else(|| crate::HueError::LightNotFound {
                name: name.to_string(),
            })
    }

    /// Applies a partial state change to the light with the given
    /// bridge-assigned id (not its display name).
    ///
    /// On success the returned map holds the attribute paths the bridge
    /// confirmed, e.g. `"/lights/1/state/on" -> true`. A non-success HTTP
    /// status, an error entry in the response array, or an undecodable body
    /// each produce a distinct error.
    ///
    /// ### Example
    /// ```no_run
    /// use huelite::CommandLight;
    /// let bridge = huelite::Bridge::for_ip([192u8, 168, 0, 4])
    ///    .with_user("rVV05G0i52vQMMLn6BK3dpr0F3uDiqtDjPLPK2uj");
    /// let command = CommandLight::default().on().with_bri(200);
    /// bridge.set_light_state("1", &command).unwrap();
    /// ```
    pub fn set_light_state(
        &self,
        light: &str,
        command: &CommandLight,
    ) -> crate::Result<Map<String, Value>> {
        let url = self.url(format_args!("lights/{light}/state"));
        let response = self
            .client
            .post(&url)
            .json(command)
            .timeout(REQUEST_TIMEOUT)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(crate::HueError::BridgeStatus {
                code: status.as_u16(),
            });
        }
        let body: Value = serde_json::from_str(&response.text()?)?;
        let items: Vec<StateResponseItem> = serde_json::from_value(body)
            .map_err(|_| crate::HueError::protocol_err("expected a success/error array"))?;

        let mut confirmed = Map::new();
        for item in items {
            match item {
                StateResponseItem::Success { success } => confirmed.extend(success),
                StateResponseItem::Error { error } => {
                    return Err(crate::HueError::BridgeError {
                        code: error.r#type,
                        msg: error.description,
                    })
                }
            }
        }
        Ok(confirmed)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LightResponse {
    Light(Box<Light>),
    Errors(Vec<BridgeError>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StateResponseItem {
    Success { success: Map<String, Value> },
    Error { error: BridgeErrorInner },
}

#[derive(Debug, Deserialize)]
struct BridgeError {
    error: BridgeErrorInner,
}

#[derive(Debug, Deserialize)]
struct BridgeErrorInner {
    description: String,
    r#type: usize,
}
