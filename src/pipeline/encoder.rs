use super::normalize::SymptomNormalizer;

/// Binary symptom-presence vector, positionally aligned to the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector {
    bits: Vec<u8>,
}

impl FeatureVector {
    pub fn zeros(width: usize) -> Self {
        Self { bits: vec![0; width] }
    }

    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Mark `index` present. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = 1;
        }
    }

    pub fn is_set(&self, index: usize) -> bool {
        self.bits.get(index).is_some_and(|b| *b == 1)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    /// Indices currently set, ascending.
    pub fn active_indices(&self) -> Vec<usize> {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == 1)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Result of folding a token list into a feature vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    pub vector: FeatureVector,
    /// Recognized tokens, counting repeats of the same symptom.
    pub matched: usize,
    pub unrecognized: Vec<String>,
}

impl Encoding {
    /// No token was understood; the vector must not be sent to the model.
    pub fn is_empty(&self) -> bool {
        self.matched == 0
    }
}

#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    normalizer: SymptomNormalizer,
}

impl FeatureEncoder {
    pub fn new(normalizer: SymptomNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn width(&self) -> usize {
        self.normalizer.vocabulary().len()
    }

    pub fn encode<S: AsRef<str>>(&self, tokens: &[S]) -> Encoding {
        let mut vector = FeatureVector::zeros(self.width());
        let mut matched = 0;
        let mut unrecognized = Vec::new();

        for token in tokens {
            let token = token.as_ref();
            match self.normalizer.resolve(token) {
                Some(index) => {
                    vector.set(index);
                    matched += 1;
                }
                None => {
                    tracing::debug!(token = %token, "Unrecognized symptom token");
                    unrecognized.push(token.to_string());
                }
            }
        }

        Encoding {
            vector,
            matched,
            unrecognized,
        }
    }
}
