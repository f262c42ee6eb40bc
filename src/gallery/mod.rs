//! Exhibited pictures, their placards, and the info modal.
//!
//! [`Gallery`] owns the interactive half of the scene: which placard the
//! pointer is over, the hover animations, and the modal a click opens.

/// Info panel state.
pub mod modal;
/// Ray casting against placards.
pub mod picking;
/// Arc layout and placard placement.
pub mod pictures;

pub use modal::InfoModal;
pub use picking::{pick_placard, Ray};
pub use pictures::{layout, HoverAnim, Placard, PicturePlacement};

use crate::options::Options;

/// Interactive gallery state.
#[derive(Debug, Clone)]
pub struct Gallery {
    pictures: Vec<PicturePlacement>,
    placards: Vec<Placard>,
    modal: InfoModal,
    hovered: Option<usize>,
}

impl Gallery {
    /// Lay out pictures and placards from options.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        let pictures = layout(options);
        let placards = pictures.iter().map(Placard::for_picture).collect();
        log::debug!("gallery: {} pictures", pictures.len());
        Self {
            pictures,
            placards,
            modal: InfoModal::new(options.pictures.entries.clone()),
            hovered: None,
        }
    }

    /// Picture placements in arc order.
    #[must_use]
    pub fn pictures(&self) -> &[PicturePlacement] {
        &self.pictures
    }

    /// Placards in arc order.
    #[must_use]
    pub fn placards(&self) -> &[Placard] {
        &self.placards
    }

    /// The info modal.
    #[must_use]
    pub fn modal(&self) -> &InfoModal {
        &self.modal
    }

    /// The info modal, mutably.
    pub fn modal_mut(&mut self) -> &mut InfoModal {
        &mut self.modal
    }

    /// Placard currently under the pointer.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Placard the ray hits, without touching hover state.
    #[must_use]
    pub fn pick(&self, ray: &Ray) -> Option<usize> {
        pick_placard(ray, &self.placards)
    }

    /// Re-target hover animations for a pointer ray (`None` when the
    /// pointer left the window). Returns whether the hovered placard
    /// changed.
    pub fn hover(&mut self, ray: Option<&Ray>) -> bool {
        let hovered = ray.and_then(|ray| self.pick(ray));
        if hovered == self.hovered {
            return false;
        }
        self.hovered = hovered;
        for (i, placard) in self.placards.iter_mut().enumerate() {
            placard.hover.set_hovered(Some(i) == hovered);
        }
        true
    }

    /// Open the modal for the picture behind placard `placard`.
    pub fn activate(&mut self, placard: usize) -> bool {
        let Some(index) = self.placards.get(placard).map(|p| p.index) else {
            return false;
        };
        self.modal.show(index).is_some()
    }

    /// Advance the placard hover animations.
    pub fn on_frame_tick(&mut self) {
        for placard in &mut self.placards {
            placard.hover.on_frame_tick();
        }
    }
}
