//! Configuration options shared by the encoder and the parser.
//!
//! ## Examples
//!
//! ```rust
//! use urltron::{stringify_with_options, Options, Value};
//!
//! // Scalars are rejected at the root unless explicitly allowed
//! let options = Options::new().with_scalar_root(true);
//! let text = stringify_with_options(&Value::from("hello world"), &options).unwrap();
//! assert_eq!(text, "hello+world");
//!
//! // Tighten the nesting limit for untrusted input
//! let options = Options::new().with_max_depth(8);
//! assert_eq!(options.max_depth, 8);
//! ```

/// Default maximum nesting depth of objects and arrays.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for encoding and decoding.
///
/// # Examples
///
/// ```rust
/// use urltron::Options;
///
/// let options = Options::new();
/// assert_eq!(options.max_depth, 128);
/// assert!(!options.scalar_root);
///
/// let options = Options::lenient().with_max_depth(16);
/// assert!(options.scalar_root);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Deepest allowed nesting of objects and arrays. The root container sits at depth 1.
    pub max_depth: usize,
    /// Whether `stringify` accepts a root that is neither an object nor an array.
    pub scalar_root: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_depth: DEFAULT_MAX_DEPTH,
            scalar_root: false,
        }
    }
}

impl Options {
    /// Creates default options: depth limit of 128, objects and arrays only at the root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that also accept scalar roots when encoding.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use urltron::{stringify_with_options, Options, Value};
    ///
    /// let text = stringify_with_options(&Value::from(""), &Options::lenient()).unwrap();
    /// assert_eq!(text, "~");
    /// ```
    #[must_use]
    pub fn lenient() -> Self {
        Options {
            scalar_root: true,
            ..Default::default()
        }
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets whether scalar roots are accepted by `stringify`.
    #[must_use]
    pub fn with_scalar_root(mut self, scalar_root: bool) -> Self {
        self.scalar_root = scalar_root;
        self
    }
}
