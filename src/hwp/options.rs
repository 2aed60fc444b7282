//! Options controlling how much of a document is read.

/// Configuration for [`Package`](super::Package) and [`parse_hwp_with`](super::parse_hwp_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Cap on sector-chain hops in the container; `None` derives it from the
    /// number of sectors in the file
    pub max_chain_hops: Option<usize>,
    /// Whether to read `BinData/*` streams into the asset registry
    pub extract_bin_data: bool,
    /// Whether assets carry a base64 copy of their bytes
    pub include_base64: bool,
    /// Whether to read `\u{5}HwpSummaryInformation`
    pub read_summary_info: bool,
    /// Whether to read the `PrvText` preview
    pub read_preview_text: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_chain_hops: None,
            extract_bin_data: true,
            include_base64: true,
            read_summary_info: true,
            read_preview_text: true,
        }
    }
}

impl ParseOptions {
    /// Create options with default values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hwp_core::hwp::ParseOptions;
    ///
    /// let options = ParseOptions::new().with_base64(false);
    /// assert!(options.extract_bin_data);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a hard cap on sector-chain hops.
    #[inline]
    pub fn with_max_chain_hops(mut self, hops: usize) -> Self {
        self.max_chain_hops = Some(hops);
        self
    }

    /// Set whether embedded binary assets are extracted.
    ///
    /// When disabled, `Document::bin_data` is left empty and images keep
    /// only their asset id.
    #[inline]
    pub fn with_bin_data(mut self, extract: bool) -> Self {
        self.extract_bin_data = extract;
        self
    }

    /// Set whether extracted assets include a base64 rendition.
    #[inline]
    pub fn with_base64(mut self, include: bool) -> Self {
        self.include_base64 = include;
        self
    }

    /// Set whether the summary-information property set is read.
    #[inline]
    pub fn with_summary_info(mut self, read: bool) -> Self {
        self.read_summary_info = read;
        self
    }

    #[inline]
    pub fn with_preview_text(mut self, read: bool) -> Self {
        self.read_preview_text = read;
        self
    }
}
