use std::fs;
use std::path::PathBuf;

use crate::{config::ParserConfig, pipelines, GuideError, PlantRecord};

/// Represents the input source for a guide
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Read the guide from a text file
    Path(PathBuf),
    /// Use guide text already in memory
    Text(String),
}

/// Builder for configuring and executing a guide import
#[derive(Debug, Default)]
pub struct PlantGuideImporterBuilder {
    source: Option<InputSource>,
    config: ParserConfig,
}

impl PlantGuideImporterBuilder {
    /// Set the input source to a text file
    ///
    /// # Example
    /// ```
    /// use plantguide_import::PlantGuideImporter;
    ///
    /// let builder = PlantGuideImporter::builder()
    ///     .path("2024_Planting_Guide.txt");
    /// ```
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(InputSource::Path(path.into()));
        self
    }

    /// Set the input source to guide text
    ///
    /// # Example
    /// ```
    /// use plantguide_import::PlantGuideImporter;
    ///
    /// let builder = PlantGuideImporter::builder()
    ///     .text("Adiantum pedatum Northern maidenhair fern\nHabitat: Moist woods");
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(InputSource::Text(text.into()));
        self
    }

    /// Replace the parser configuration
    pub fn config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Set how many lines after an entry are scanned for fields
    pub fn lookahead(mut self, lines: usize) -> Self {
        self.config.lookahead = lines;
        self
    }

    /// Set how many lines in a loosely entry-shaped line starts closing the window
    pub fn early_stop_after(mut self, lines: usize) -> Self {
        self.config.early_stop_after = lines;
        self
    }

    /// Harvest repeated entries and let the merge keep the longest habitat
    pub fn keep_duplicate_candidates(mut self) -> Self {
        self.config.keep_duplicate_candidates = true;
        self
    }

    /// Build and execute the import
    ///
    /// # Errors
    /// Returns `GuideError` if no source was specified or the file cannot be
    /// read. The guide text itself never causes an error.
    ///
    /// # Example
    /// ```
    /// # use plantguide_import::PlantGuideImporter;
    /// let plants = PlantGuideImporter::builder()
    ///     .text("Adiantum pedatum Northern maidenhair fern\nHabitat: Moist woods")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(plants[0].scientific_name, "Adiantum pedatum");
    /// ```
    pub fn build(self) -> Result<Vec<PlantRecord>, GuideError> {
        let source = self.source.ok_or_else(|| {
            GuideError::BuilderError(
                "No input source specified. Use .path() or .text()".to_string(),
            )
        })?;

        let content = match source {
            InputSource::Path(path) => fs::read_to_string(&path)?,
            InputSource::Text(text) => text,
        };

        Ok(pipelines::parse::process(&content, &self.config))
    }
}

/// Main entry point for the builder API
pub struct PlantGuideImporter;

impl PlantGuideImporter {
    /// Creates a new builder for importing a guide
    ///
    /// # Example
    /// ```
    /// use plantguide_import::PlantGuideImporter;
    ///
    /// let builder = PlantGuideImporter::builder();
    /// ```
    pub fn builder() -> PlantGuideImporterBuilder {
        PlantGuideImporterBuilder::default()
    }
}
