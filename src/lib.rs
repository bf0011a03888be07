//! A small blocking client for the Philips Hue bridge v1 REST API.
//!
//! Lights are enumerated by probing the bridge's per-index light endpoints,
//! and state changes are sent as sparse JSON patches that only carry the
//! attributes the caller set.
//!
//! ```no_run
//! use huelite::{Bridge, CommandLight};
//!
//! let bridge = Bridge::for_ip([192u8, 168, 0, 4])
//!     .with_user("rVV05G0i52vQMMLn6BK3dpr0F3uDiqtDjPLPK2uj");
//! let light = bridge.get_light_by_name("Kitchen").unwrap();
//! println!("{:?}", light.state);
//! bridge
//!     .set_light_state("1", &CommandLight::default().on().with_bri(200))
//!     .unwrap();
//! ```
//!
//! Errors are recorded through the [`log`] facade; install any logger
//! implementation to observe skipped indices and bridge status codes.

pub mod error;
pub use error::{HueError, Result};
pub mod lights;
pub use lights::{Light, LightState};
pub mod bridge;
pub use bridge::{Bridge, CommandLight, UnauthBridge};
