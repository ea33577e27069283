//! Labelled training data for the genre classifier.

use crate::error::{LibrisError, Result};
use std::io::Read;
use std::path::Path;

/// One labelled example.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub text: String,
    pub genre: String,
}

/// A set of labelled examples.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    samples: Vec<Sample>,
}

/// Built-in examples: two descriptions per genre.
const BUILTIN: &[(&str, &str)] = &[
    ("magia dragones espada guerrero aventura hechizo varita elfo enano mundo magico orcos gnomos cronicas reino", "Fantasia"),
    ("una historia de magos y dragones con espadas legendarias y mucha aventura caballeros fantasia", "Fantasia"),
    ("crimen detective asesinato misterio policia huellas culpable investigacion forense thriller suspense noir inspector pistas", "Policial"),
    ("un detective busca al asesino en un misterio policial lleno de intriga resolucion de casos", "Policial"),
    ("amor romance pareja enamorados boda pasion corazon novios cita romantica sentimientos drama amoroso besos", "Romance"),
    ("historia de amor sobre una pareja de enamorados que planean su boda enamoramiento jovenes adultos", "Romance"),
    ("futuro naves espaciales robots planetas galaxia tecnologia alienigenas cosmos distopia ciberpunk interestelar marte", "Ciencia Ficcion"),
    ("viaje al futuro en naves espaciales con robots inteligentes y otros planetas colonizacion espacial", "Ciencia Ficcion"),
    ("fantasmas terror miedo susto sangre oscuro pesadilla monstruo espiritu grito posesion casa maldita paranormal", "Terror"),
    ("un relato de terror con fantasmas y monstruos en un ambiente oscuro y de miedo horror psicologico", "Terror"),
    ("historia antigua guerra reyes imperio epoca medieval caballero batalla siglo biografia revolucion pasado archivos", "Historica"),
    ("narración sobre la historia antigua con reyes y batallas de un imperio caido hechos reales victoria", "Historica"),
];

const TEXT_COLUMNS: &[&str] = &["text", "texto"];
const GENRE_COLUMNS: &[&str] = &["genre", "genero", "género"];

impl Dataset {
    /// Create a dataset, rejecting empty sets and blank rows.
    pub fn new(samples: Vec<Sample>) -> Result<Self> {
        if samples.is_empty() {
            return Err(LibrisError::Dataset("dataset is empty".to_string()));
        }
        if let Some(pos) = samples
            .iter()
            .position(|s| s.text.trim().is_empty() || s.genre.trim().is_empty())
        {
            return Err(LibrisError::Dataset(format!(
                "sample {} has an empty text or genre",
                pos + 1
            )));
        }
        Ok(Self { samples })
    }

    /// The built-in Spanish dataset.
    pub fn builtin() -> Self {
        Self {
            samples: BUILTIN
                .iter()
                .map(|(text, genre)| Sample {
                    text: text.to_string(),
                    genre: genre.to_string(),
                })
                .collect(),
        }
    }

    /// Load a CSV file with `text,genre` (or `texto,genero`) headers.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Load CSV data from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = rdr.headers()?.clone();
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.contains(&h.to_lowercase().as_str()))
        };

        let text_idx = find(TEXT_COLUMNS).ok_or_else(|| {
            LibrisError::Dataset("missing 'text' (or 'texto') column".to_string())
        })?;
        let genre_idx = find(GENRE_COLUMNS).ok_or_else(|| {
            LibrisError::Dataset("missing 'genre' (or 'genero') column".to_string())
        })?;

        let mut samples = Vec::new();
        for record in rdr.records() {
            let record = record?;
            samples.push(Sample {
                text: record.get(text_idx).unwrap_or_default().to_string(),
                genre: record.get(genre_idx).unwrap_or_default().to_string(),
            });
        }

        Self::new(samples)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn texts(&self) -> Vec<String> {
        self.samples.iter().map(|s| s.text.clone()).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.samples.iter().map(|s| s.genre.clone()).collect()
    }

    /// Distinct genres, sorted.
    pub fn genres(&self) -> Vec<String> {
        let mut genres = self.labels();
        genres.sort();
        genres.dedup();
        genres
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_six_genres() {
        let dataset = Dataset::builtin();
        assert_eq!(dataset.len(), 12);
        assert_eq!(
            dataset.genres(),
            vec!["Ciencia Ficcion", "Fantasia", "Historica", "Policial", "Romance", "Terror"]
        );
    }

    #[test]
    fn test_from_reader_spanish_headers() {
        let csv = "texto,genero\n\"espias y traiciones\",Thriller\ncocina casera,Gastronomia\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.samples()[0].genre, "Thriller");
    }

    #[test]
    fn test_from_reader_reordered_columns() {
        let csv = "genre,text\nPoesia,versos y rimas\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.samples()[0].text, "versos y rimas");
    }

    #[test]
    fn test_missing_column_is_error() {
        let csv = "title,genre\nx,y\n";
        assert!(Dataset::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_empty_and_blank_rows_rejected() {
        assert!(Dataset::from_reader("text,genre\n".as_bytes()).is_err());
        assert!(Dataset::from_reader("text,genre\n  ,Terror\n".as_bytes()).is_err());
    }
}
