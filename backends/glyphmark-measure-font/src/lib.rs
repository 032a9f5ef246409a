//! Font Measurer - real advances and line heights from font files
//!
//! Fonts are loaded into memory once and parsed on demand with skrifa.
//! Faces are registered per family, optionally per bold/italic variant;
//! a lookup falls back from the exact variant to the family's regular
//! face and then to the default face. Characters missing from a face
//! measure as its `.notdef` glyph.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use glyphmark_core::error::{MeasureError, Result};
use glyphmark_core::{FontDescriptor, Measurer};
use skrifa::instance::{LocationRef, Size};
use skrifa::string::StringId;
use skrifa::{FontRef, GlyphId, MetadataProvider};

/// Advance used when no face at all is available, as a fraction of the size
const MISSING_FONT_ADVANCE_RATIO: f32 = 0.5;

/// Line height used when no face at all is available
const MISSING_FONT_LINE_HEIGHT_RATIO: f32 = 1.2;

/// Font bytes plus the face to read from them
pub struct FontFile {
    data: Vec<u8>,
    face_index: u32,
}

impl FontFile {
    /// Read a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Read one face of a font collection from disk
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let data = fs::read(path.as_ref())
            .map_err(|_| MeasureError::FileNotFound(path.as_ref().display().to_string()))?;
        Self::from_data_index(data, face_index)
    }

    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Validate and keep raw font bytes
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        FontRef::from_index(&data, face_index).map_err(|_| MeasureError::InvalidData)?;
        Ok(Self { data, face_index })
    }

    fn font_ref(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, self.face_index).ok()
    }

    /// Family name from the naming table
    pub fn family_name(&self) -> Option<String> {
        let font = self.font_ref()?;
        let name = font
            .localized_strings(StringId::FAMILY_NAME)
            .english_or_first()?;
        Some(name.to_string())
    }

    /// Advance of `ch` at `size` pixels per em
    pub fn advance(&self, ch: char, size: f32) -> Option<f32> {
        let font = self.font_ref()?;
        let glyph = font.charmap().map(ch).unwrap_or(GlyphId::NOTDEF);
        font.glyph_metrics(Size::new(size), LocationRef::default())
            .advance_width(glyph)
    }

    /// Ascent minus descent plus line gap at `size` pixels per em
    pub fn line_height(&self, size: f32) -> Option<f32> {
        let font = self.font_ref()?;
        let metrics = font.metrics(Size::new(size), LocationRef::default());
        Some(metrics.ascent - metrics.descent + metrics.leading)
    }
}

impl std::fmt::Debug for FontFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFile")
            .field("bytes", &self.data.len())
            .field("face_index", &self.face_index)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FaceKey {
    family: String,
    bold: bool,
    italic: bool,
}

impl FaceKey {
    fn new(family: &str, bold: bool, italic: bool) -> Self {
        Self {
            family: family.trim().to_lowercase(),
            bold,
            italic,
        }
    }
}

/// A [`Measurer`] over registered font files
#[derive(Debug, Default)]
pub struct FontMeasurer {
    faces: HashMap<FaceKey, Arc<FontFile>>,
    default_face: Option<Arc<FontFile>>,
    current: Option<Arc<FontFile>>,
    size: f32,
    /// Advances for the current face and size
    advances: HashMap<char, f32>,
}

impl FontMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A measurer that uses `font` for every family
    ///
    /// The face is also registered under its own family name.
    pub fn with_default(font: FontFile) -> Self {
        let mut measurer = Self::new();
        let font = Arc::new(font);
        if let Some(family) = font.family_name() {
            log::debug!("FontMeasurer: default face is {}", family);
            measurer.faces.insert(FaceKey::new(&family, false, false), font.clone());
        }
        measurer.default_face = Some(font);
        measurer
    }

    /// Load a font file and use it for every family
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_default(FontFile::from_file(path)?))
    }

    /// Register the regular face of `family`
    pub fn add_family(&mut self, family: &str, font: FontFile) -> &mut Self {
        self.add_variant(family, false, false, font)
    }

    /// Register a specific weight/slant of `family`
    pub fn add_variant(&mut self, family: &str, bold: bool, italic: bool, font: FontFile) -> &mut Self {
        let font = Arc::new(font);
        if self.default_face.is_none() {
            self.default_face = Some(font.clone());
        }
        self.faces.insert(FaceKey::new(family, bold, italic), font);
        self
    }

    /// Make a registered family the fallback for unknown ones
    pub fn set_default_family(&mut self, family: &str) -> Result<()> {
        let face = self
            .faces
            .get(&FaceKey::new(family, false, false))
            .cloned()
            .ok_or_else(|| MeasureError::UnknownFamily(family.to_string()))?;
        self.default_face = Some(face);
        Ok(())
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.faces.contains_key(&FaceKey::new(family, false, false))
    }

    fn lookup(&self, family: &str, bold: bool, italic: bool) -> Option<Arc<FontFile>> {
        // CSS-style lists: first family that is registered wins
        family
            .split(',')
            .map(|name| name.trim().trim_matches(|c| c == '"' || c == '\''))
            .find_map(|name| {
                self.faces
                    .get(&FaceKey::new(name, bold, italic))
                    .or_else(|| self.faces.get(&FaceKey::new(name, false, false)))
            })
            .or(self.default_face.as_ref())
            .cloned()
    }
}

impl Measurer for FontMeasurer {
    fn name(&self) -> &'static str {
        "font"
    }

    fn configure(&mut self, font: &FontDescriptor) {
        self.current = self.lookup(&font.family, font.bold, font.italic);
        self.size = font.size;
        self.advances.clear();
        if self.current.is_none() {
            log::debug!("FontMeasurer: no face for {}, using fixed metrics", font);
        }
    }

    fn measure_char(&mut self, ch: char) -> f32 {
        if let Some(advance) = self.advances.get(&ch) {
            return *advance;
        }
        let advance = self
            .current
            .as_ref()
            .and_then(|face| face.advance(ch, self.size))
            .unwrap_or(self.size * MISSING_FONT_ADVANCE_RATIO);
        self.advances.insert(ch, advance);
        advance
    }

    fn line_height(&mut self, size: f32, family: &str) -> f32 {
        self.lookup(family, false, false)
            .and_then(|face| face.line_height(size))
            .unwrap_or(size * MISSING_FONT_LINE_HEIGHT_RATIO)
    }
}
