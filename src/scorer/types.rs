use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ScoreDetails {
    pub score: f64,

    // Credited words, in the order they were first found
    pub words: Vec<String>,

    // Offsets where a dictionary word started (repeats included)
    pub hits: usize,
}
