/// Options controlling how a mesh file is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Center and rescale the parsed vertices into a unit volume. Default: true
    pub normalize: bool,

    /// Reject face references past the end of the vertex list. Default: true
    pub validate_indices: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            validate_indices: true,
        }
    }
}

impl LoadOptions {
    /// Keep coordinates exactly as written in the file.
    pub fn raw() -> Self {
        Self {
            normalize: false,
            ..Default::default()
        }
    }

    /// Accept any face reference, leaving range checks to the caller.
    pub fn permissive() -> Self {
        Self {
            validate_indices: false,
            ..Default::default()
        }
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn with_validate_indices(mut self, validate_indices: bool) -> Self {
        self.validate_indices = validate_indices;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LoadOptions::default();
        assert!(options.normalize);
        assert!(options.validate_indices);
    }

    #[test]
    fn test_presets() {
        assert!(!LoadOptions::raw().normalize);
        assert!(LoadOptions::raw().validate_indices);
        assert!(!LoadOptions::permissive().validate_indices);
        assert_eq!(
            LoadOptions::default()
                .with_normalize(false)
                .with_validate_indices(false),
            LoadOptions {
                normalize: false,
                validate_indices: false,
            }
        );
    }
}
