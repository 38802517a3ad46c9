//! Session state and the UI event reducer.
//!
//! All transient UI state lives in one `SessionState`; handlers translate
//! browser actions into `UiEvent`s and `apply` is the only place state
//! changes. The credential is held in memory for the session and is never
//! written to disk or echoed back in views.

use serde::Serialize;

use crate::core::picker::{PickerSurface, SurfaceView};
use crate::core::viewport::ContainerSize;
use crate::models::{ColorSample, LipstickProduct};

/// Closed set of UI events the session reacts to
pub enum UiEvent {
    ImageUploaded { surface: PickerSurface },
    ContainerResized { container: ContainerSize },
    CredentialEntered { api_key: String },
    ColorPicked { sample: ColorSample },
    LookupStarted,
    LookupSettled {
        seq: u64,
        outcome: Result<Vec<LipstickProduct>, String>,
    },
    Reset { keep_credential: bool },
}

#[derive(Default)]
pub struct SessionState {
    pub picker: Option<PickerSurface>,
    pub selected_color: Option<ColorSample>,
    pub results: Vec<LipstickProduct>,
    pub loading: bool,
    pub error: Option<String>,
    pub api_key: String,
    pub request_seq: u64,
}

/// Serializable snapshot of the session for API responses
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub image: Option<SurfaceView>,
    pub selected_color: Option<ColorSample>,
    pub results: Vec<LipstickProduct>,
    pub loading: bool,
    pub error: Option<String>,
    pub has_credential: bool,
    pub can_submit: bool,
}

impl SessionState {
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::ImageUploaded { surface } => {
                self.clear_transient();
                self.picker = Some(surface);
            }
            UiEvent::ContainerResized { container } => {
                if let Some(picker) = self.picker.as_mut() {
                    picker.set_container(container);
                }
            }
            UiEvent::CredentialEntered { api_key } => {
                self.api_key = api_key.trim().to_string();
            }
            UiEvent::ColorPicked { sample } => {
                if self.picker.is_some() {
                    self.selected_color = Some(sample);
                    self.results.clear();
                    self.error = None;
                }
            }
            UiEvent::LookupStarted => {
                self.loading = true;
                self.error = None;
                self.results.clear();
                self.request_seq += 1;
            }
            UiEvent::LookupSettled { seq, outcome } => {
                // a newer lookup superseded this one
                if seq != self.request_seq {
                    return;
                }

                self.loading = false;
                match outcome {
                    Ok(products) => self.results = products,
                    Err(message) => self.error = Some(message),
                }
            }
            UiEvent::Reset { keep_credential } => {
                self.clear_transient();
                self.picker = None;
                if !keep_credential {
                    self.api_key.clear();
                }
            }
        }
    }

    /// Clear everything except the credential and the picker
    fn clear_transient(&mut self) {
        self.selected_color = None;
        self.results.clear();
        self.loading = false;
        self.error = None;
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// A lookup needs both a selected color and a credential
    pub fn can_submit(&self) -> bool {
        self.selected_color.is_some() && self.has_credential()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            image: self.picker.as_ref().map(|p| p.view()),
            selected_color: self.selected_color.clone(),
            results: self.results.clone(),
            loading: self.loading,
            error: self.error.clone(),
            has_credential: self.has_credential(),
            can_submit: self.can_submit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::raster::{encode_png, RasterImage};

    fn red_surface() -> PickerSurface {
        let png = encode_png(&[(255, 0, 0); 4], 2, 2);
        let image = RasterImage::from_bytes(&png).unwrap();
        PickerSurface::new(image, ContainerSize::new(200.0, 1000.0))
    }

    fn sample(hex_str: &str) -> ColorSample {
        ColorSample::from_hex(hex_str).unwrap()
    }

    #[test]
    fn test_upload_clears_transient_but_keeps_credential() {
        let mut state = SessionState::default();
        state.apply(UiEvent::CredentialEntered {
            api_key: "key-123".into(),
        });
        state.apply(UiEvent::ImageUploaded {
            surface: red_surface(),
        });
        state.apply(UiEvent::ColorPicked {
            sample: sample("#ff0000"),
        });
        state.error = Some("old error".into());

        state.apply(UiEvent::ImageUploaded {
            surface: red_surface(),
        });

        assert!(state.picker.is_some());
        assert!(state.selected_color.is_none());
        assert!(state.error.is_none());
        assert_eq!(state.api_key, "key-123");
    }

    #[test]
    fn test_pick_replaces_color_and_clears_results() {
        let mut state = SessionState::default();
        state.apply(UiEvent::ImageUploaded {
            surface: red_surface(),
        });
        state.results = vec![LipstickProduct::new("Acme", "Red Hot")];
        state.error = Some("boom".into());

        state.apply(UiEvent::ColorPicked {
            sample: sample("#123456"),
        });

        assert_eq!(state.selected_color.as_ref().unwrap().hex, "#123456");
        assert!(state.results.is_empty());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_pick_without_image_is_ignored() {
        let mut state = SessionState::default();
        state.apply(UiEvent::ColorPicked {
            sample: sample("#123456"),
        });

        assert!(state.selected_color.is_none());
    }

    #[test]
    fn test_lookup_lifecycle() {
        let mut state = SessionState::default();
        state.apply(UiEvent::LookupStarted);
        let seq = state.request_seq;
        assert!(state.loading);

        state.apply(UiEvent::LookupSettled {
            seq,
            outcome: Ok(vec![LipstickProduct::new("Acme", "Red Hot")]),
        });

        assert!(!state.loading);
        assert_eq!(state.results.len(), 1);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_lookup_error_sets_message() {
        let mut state = SessionState::default();
        state.apply(UiEvent::LookupStarted);
        let seq = state.request_seq;

        state.apply(UiEvent::LookupSettled {
            seq,
            outcome: Err("The provided API key is invalid.".into()),
        });

        assert!(!state.loading);
        assert!(state.results.is_empty());
        assert_eq!(
            state.error.as_deref(),
            Some("The provided API key is invalid.")
        );
    }

    #[test]
    fn test_stale_lookup_is_discarded() {
        let mut state = SessionState::default();
        state.apply(UiEvent::LookupStarted);
        let first = state.request_seq;
        state.apply(UiEvent::LookupStarted);

        state.apply(UiEvent::LookupSettled {
            seq: first,
            outcome: Ok(vec![LipstickProduct::new("Stale", "Shade")]),
        });

        // the newer lookup is still in flight
        assert!(state.loading);
        assert!(state.results.is_empty());

        state.apply(UiEvent::LookupSettled {
            seq: state.request_seq,
            outcome: Ok(vec![LipstickProduct::new("Fresh", "Shade")]),
        });
        assert_eq!(state.results[0].brand, "Fresh");
    }

    #[test]
    fn test_reset_variants() {
        let mut state = SessionState::default();
        state.apply(UiEvent::CredentialEntered {
            api_key: "key-123".into(),
        });
        state.apply(UiEvent::ImageUploaded {
            surface: red_surface(),
        });

        state.apply(UiEvent::Reset {
            keep_credential: true,
        });
        assert!(state.picker.is_none());
        assert_eq!(state.api_key, "key-123");

        state.apply(UiEvent::Reset {
            keep_credential: false,
        });
        assert!(state.api_key.is_empty());
    }

    #[test]
    fn test_view_exposes_no_credential_value() {
        let mut state = SessionState::default();
        state.apply(UiEvent::CredentialEntered {
            api_key: "secret-key".into(),
        });

        let view = state.view();
        assert!(view.has_credential);

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("secret-key"));
    }

    #[test]
    fn test_can_submit_requires_color_and_credential() {
        let mut state = SessionState::default();
        assert!(!state.can_submit());

        state.apply(UiEvent::ImageUploaded {
            surface: red_surface(),
        });
        state.apply(UiEvent::ColorPicked {
            sample: sample("#ff0000"),
        });
        assert!(!state.can_submit());

        state.apply(UiEvent::CredentialEntered {
            api_key: "key".into(),
        });
        assert!(state.can_submit());
    }
}
