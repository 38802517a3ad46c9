//! In-memory store owning the single UI session

use parking_lot::RwLock;

use crate::core::magnifier::{self, MagnifierView};
use crate::core::picker::PickerSurface;
use crate::core::raster::RasterImage;
use crate::core::session::{SessionState, SessionView, UiEvent};
use crate::core::swatches;
use crate::core::viewport::ContainerSize;
use crate::models::{ColorSample, LipstickProduct};

/// Why a lookup was not started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupRefusal {
    NoColorSelected,
    MissingCredential,
}

/// Everything one lookup needs, snapshotted so no lock is held while the
/// provider call is in flight
#[derive(Debug, Clone)]
pub struct LookupTicket {
    pub seq: u64,
    pub hex: String,
    pub api_key: String,
}

/// Store for the one live session; handlers share it through `web::Data`
pub struct SessionStore {
    state: RwLock<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
        }
    }

    pub fn view(&self) -> SessionView {
        self.state.read().view()
    }

    pub fn has_image(&self) -> bool {
        self.state.read().picker.is_some()
    }

    /// Install a freshly decoded image as the new picker surface
    pub fn install_image(&self, image: RasterImage, container: ContainerSize) -> SessionView {
        let surface = PickerSurface::new(image, container);

        let mut state = self.state.write();
        state.apply(UiEvent::ImageUploaded { surface });
        state.view()
    }

    /// Refit the display transform after a client resize
    pub fn set_container(&self, container: ContainerSize) -> Option<SessionView> {
        let mut state = self.state.write();
        state.picker.as_ref()?;

        state.apply(UiEvent::ContainerResized { container });
        Some(state.view())
    }

    /// Sample + magnifier placement for a pointer position
    pub fn probe(&self, dx: f64, dy: f64) -> Option<(ColorSample, MagnifierView)> {
        let state = self.state.read();
        let picker = state.picker.as_ref()?;

        Some((
            picker.sample_display_point(dx, dy),
            magnifier::magnifier_at(picker, dx, dy),
        ))
    }

    /// Render the magnifier preview PNG for a pointer position
    pub fn magnifier_png(&self, dx: f64, dy: f64) -> Option<anyhow::Result<Vec<u8>>> {
        let state = self.state.read();
        let picker = state.picker.as_ref()?;

        Some(magnifier::render_png(picker, dx, dy))
    }

    /// Suggested swatches extracted from the current image
    pub fn swatches(&self, count: usize) -> Option<Vec<ColorSample>> {
        let state = self.state.read();
        let picker = state.picker.as_ref()?;

        Some(swatches::suggest_swatches(picker.image(), count))
    }

    /// Pick the color under a display point
    pub fn pick_at(&self, dx: f64, dy: f64) -> Option<ColorSample> {
        let mut state = self.state.write();
        let sample = state.picker.as_ref()?.sample_display_point(dx, dy);

        state.apply(UiEvent::ColorPicked {
            sample: sample.clone(),
        });

        Some(sample)
    }

    /// Pick an exact color, as when a suggested swatch is clicked
    pub fn pick_hex(&self, hex_str: &str) -> Option<ColorSample> {
        let sample = ColorSample::from_hex(hex_str)?;

        let mut state = self.state.write();
        state.picker.as_ref()?;

        state.apply(UiEvent::ColorPicked {
            sample: sample.clone(),
        });

        Some(sample)
    }

    pub fn set_credential(&self, api_key: String) -> SessionView {
        let mut state = self.state.write();
        state.apply(UiEvent::CredentialEntered { api_key });
        state.view()
    }

    pub fn reset(&self, keep_credential: bool) -> SessionView {
        let mut state = self.state.write();
        state.apply(UiEvent::Reset { keep_credential });
        state.view()
    }

    /// Start a lookup: flips the loading flag and snapshots the inputs
    pub fn begin_lookup(&self) -> Result<LookupTicket, LookupRefusal> {
        let mut state = self.state.write();

        let Some(color) = state.selected_color.clone() else {
            return Err(LookupRefusal::NoColorSelected);
        };
        if !state.has_credential() {
            return Err(LookupRefusal::MissingCredential);
        }

        state.apply(UiEvent::LookupStarted);

        Ok(LookupTicket {
            seq: state.request_seq,
            hex: color.hex,
            api_key: state.api_key.clone(),
        })
    }

    /// Apply a lookup outcome; stale sequences are dropped by the reducer
    pub fn settle_lookup(
        &self,
        seq: u64,
        outcome: Result<Vec<LipstickProduct>, String>,
    ) -> SessionView {
        let mut state = self.state.write();
        state.apply(UiEvent::LookupSettled { seq, outcome });
        state.view()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::raster::encode_png;

    fn store_with_image() -> SessionStore {
        let store = SessionStore::new();
        let png = encode_png(
            &[(255, 0, 0), (0, 255, 0), (0, 0, 255), (255, 255, 255)],
            2,
            2,
        );
        let image = RasterImage::from_bytes(&png).unwrap();
        store.install_image(image, ContainerSize::new(200.0, 1000.0));
        store
    }

    #[test]
    fn test_probe_and_pick_flow() {
        let store = store_with_image();

        let (sample, magnifier) = store.probe(10.0, 10.0).unwrap();
        assert_eq!(sample.hex, "#ff0000");
        assert!(magnifier.visible);

        let picked = store.pick_at(10.0, 10.0).unwrap();
        assert_eq!(picked.hex, "#ff0000");
        assert_eq!(store.view().selected_color.unwrap().hex, "#ff0000");
    }

    #[test]
    fn test_probe_without_image() {
        let store = SessionStore::new();
        assert!(store.probe(0.0, 0.0).is_none());
        assert!(store.pick_at(0.0, 0.0).is_none());
        assert!(store.swatches(6).is_none());
        assert!(store.set_container(ContainerSize::default()).is_none());
    }

    #[test]
    fn test_pick_hex_requires_image_and_valid_color() {
        let store = SessionStore::new();
        assert!(store.pick_hex("#ff0000").is_none());

        let store = store_with_image();
        assert!(store.pick_hex("nope").is_none());
        assert_eq!(store.pick_hex("#ab12cd").unwrap().hex, "#ab12cd");
    }

    #[test]
    fn test_lookup_refusals() {
        let store = store_with_image();
        assert_eq!(
            store.begin_lookup().unwrap_err(),
            LookupRefusal::NoColorSelected
        );

        store.pick_at(0.0, 0.0);
        assert_eq!(
            store.begin_lookup().unwrap_err(),
            LookupRefusal::MissingCredential
        );

        store.set_credential("key-123".into());
        let ticket = store.begin_lookup().unwrap();
        assert_eq!(ticket.hex, "#ff0000");
        assert_eq!(ticket.api_key, "key-123");
        assert!(store.view().loading);
    }

    #[test]
    fn test_settle_applies_results() {
        let store = store_with_image();
        store.pick_at(0.0, 0.0);
        store.set_credential("key-123".into());

        let ticket = store.begin_lookup().unwrap();
        let view = store.settle_lookup(
            ticket.seq,
            Ok(vec![LipstickProduct::new("Acme", "Red Hot")]),
        );

        assert!(!view.loading);
        assert_eq!(view.results.len(), 1);
    }
}
