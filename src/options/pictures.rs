use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One exhibited picture and the text its info modal shows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct PictureEntry {
    /// Image file name, relative to the assets directory.
    pub file: String,
    /// Modal heading.
    pub title: String,
    /// Modal body text.
    pub description: String,
}

impl PictureEntry {
    fn new(file: &str, title: &str, description: &str) -> Self {
        Self {
            file: file.to_owned(),
            title: title.to_owned(),
            description: description.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Pictures", inline)]
#[serde(default)]
/// Picture arc layout and the static metadata table.
pub struct PictureOptions {
    /// Radius of the arc the pictures hang on.
    pub radius: f32,
    /// Height of picture centers above the floor.
    pub height: f32,
    /// Picture width.
    pub width: f32,
    /// Picture height.
    pub image_height: f32,
    /// Placard text rendered under every picture.
    pub placard_label: String,
    /// Pictures in arc order, left to right.
    pub entries: Vec<PictureEntry>,
}

impl Default for PictureOptions {
    fn default() -> Self {
        Self {
            radius: 8.0,
            height: 2.5,
            width: 2.5,
            image_height: 3.0,
            placard_label: "Matrix has you".to_owned(),
            entries: vec![
                PictureEntry::new(
                    "1.png",
                    "Artwork 1",
                    "This is the first stunning piece in our collection. It \
                     represents the beginning of a journey through digital \
                     art and imagination.",
                ),
                PictureEntry::new(
                    "2.png",
                    "Artwork 2",
                    "The second masterpiece explores themes of color and \
                     form, creating a visual symphony that captivates the \
                     viewer.",
                ),
                PictureEntry::new(
                    "3.png",
                    "Artwork 3",
                    "A centerpiece of the exhibition, this work combines \
                     traditional techniques with modern digital expression.",
                ),
                PictureEntry::new(
                    "4.png",
                    "Artwork 4",
                    "This piece invites contemplation, with layers of meaning \
                     hidden within its intricate details.",
                ),
                PictureEntry::new(
                    "5.png",
                    "Artwork 5",
                    "The final artwork in our gallery tour, representing the \
                     culmination of artistic vision and technical mastery.",
                ),
            ],
        }
    }
}

impl PictureOptions {
    /// Number of pictures on the arc.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}
