//! Gateway FM radio operations
//!
//! The radio exposes three vendor methods: `play_fm` for transport control,
//! `volume_ctrl_fm` for volume and `get_prop_fm` for polling state.

pub mod get_prop_fm;
pub mod play_fm;
pub mod volume_ctrl_fm;

pub use get_prop_fm::{FmProperties, GetPropFmOperation};
pub use play_fm::{FmAction, PlayFmOperation, PlayFmRequest};
pub use volume_ctrl_fm::{VolumeCtrlFmOperation, VolumeCtrlFmRequest};
