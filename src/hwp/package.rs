//! Document assembly: container, file header, style tables, sections and
//! binary assets.

use super::bin_data::collect_assets;
use super::decompress::decompress;
use super::docinfo::DocInfo;
use super::header::FileHeader;
use super::options::ParseOptions;
use super::section::parse_section;
use crate::common::binary::parse_utf16le_string;
use crate::common::{Error, IdGenerator, Result};
use crate::document::{Document, Metadata, Section};
use crate::ole::OleFile;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub const FILE_HEADER_STREAM: &str = "FileHeader";
pub const DOC_INFO_STREAM: &str = "DocInfo";
pub const BODY_TEXT_STORAGE: &str = "BodyText";
pub const VIEW_TEXT_STORAGE: &str = "ViewText";
pub const SUMMARY_INFO_STREAM: &str = "\u{5}HwpSummaryInformation";
pub const PREVIEW_TEXT_STREAM: &str = "PrvText";

/// An opened HWP container with a validated file header.
///
/// # Examples
///
/// ```rust,no_run
/// use hwp_core::hwp::{Package, ParseOptions};
///
/// let package = Package::open("report.hwp", ParseOptions::new().with_base64(false))?;
/// println!("HWP {}", package.header().version);
/// let doc = package.document()?;
/// println!("{} sections", doc.sections.len());
/// # Ok::<(), hwp_core::Error>(())
/// ```
pub struct Package {
    ole: OleFile,
    header: FileHeader,
    options: ParseOptions,
}

impl Package {
    /// Open an HWP file from disk.
    pub fn open<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), options)
    }

    pub fn from_reader<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(bytes, options)
    }

    /// Open an in-memory container and validate its file header.
    ///
    /// Encrypted and distribution documents are rejected here, before any
    /// record stream is decoded.
    pub fn from_bytes(bytes: Vec<u8>, options: ParseOptions) -> Result<Self> {
        let ole = OleFile::from_bytes_with_limit(bytes, options.max_chain_hops)?;
        let header = FileHeader::parse(&read_required(&ole, FILE_HEADER_STREAM)?)?;
        log::debug!(
            "HWP {} compressed={} encrypted={} distribution={}",
            header.version,
            header.is_compressed(),
            header.is_encrypted(),
            header.is_distribution()
        );

        if header.is_encrypted() {
            return Err(Error::Encrypted);
        }
        if header.is_distribution() {
            return Err(Error::Unsupported(
                "distribution document (encrypted ViewText streams)".to_string(),
            ));
        }

        Ok(Self {
            ole,
            header,
            options,
        })
    }

    #[inline]
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    #[inline]
    pub fn container(&self) -> &OleFile {
        &self.ole
    }

    /// Read a stream and undo the document-level compression.
    fn read_decompressed(&self, path: &[&str]) -> Result<Vec<u8>> {
        let raw = self.ole.open_stream(path)?;
        Ok(decompress(&raw, self.header.is_compressed()).into_owned())
    }

    /// Decode the document-info stream.
    pub fn doc_info(&self) -> Result<DocInfo> {
        if !self.ole.exists(&[DOC_INFO_STREAM]) {
            return Err(Error::ComponentNotFound(DOC_INFO_STREAM.to_string()));
        }
        let info = DocInfo::parse(&self.read_decompressed(&[DOC_INFO_STREAM])?);
        if info.truncated {
            log::warn!("DocInfo stream is truncated; later style records are missing");
        }
        Ok(info)
    }

    /// Names of the consecutive `BodyText/Section{n}` streams.
    pub fn section_names(&self) -> Vec<String> {
        (0..)
            .map(|n| format!("Section{}", n))
            .take_while(|name| self.ole.exists(&[BODY_TEXT_STORAGE, name.as_str()]))
            .collect()
    }

    /// Parse the whole document.
    pub fn document(&self) -> Result<Document> {
        let doc_info = self.doc_info()?;

        let names = self.section_names();
        if names.is_empty() && self.ole.exists(&[VIEW_TEXT_STORAGE]) {
            return Err(Error::Unsupported(
                "document body is only stored in ViewText".to_string(),
            ));
        }

        let mut ids = IdGenerator::new();
        let mut sections: Vec<Section> = Vec::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            let data = self.read_decompressed(&[BODY_TEXT_STORAGE, name.as_str()])?;
            sections.push(parse_section(&data, index, &doc_info, &mut ids));
        }
        if let Some(declared) = doc_info.properties.map(|p| p.section_count)
            && declared as usize != sections.len()
        {
            log::warn!(
                "document declares {} sections, found {}",
                declared,
                sections.len()
            );
        }

        let bin_data = if self.options.extract_bin_data {
            collect_assets(
                &self.ole,
                &doc_info,
                self.header.is_compressed(),
                self.options.include_base64,
            )
        } else {
            Default::default()
        };

        let metadata = self.metadata(&doc_info);
        log::info!(
            "parsed HWP {}: {} sections, {} elements, {} assets",
            metadata.version,
            sections.len(),
            ids.issued(),
            bin_data.len()
        );

        Ok(Document {
            metadata,
            sections,
            bin_data,
        })
    }

    /// Header flags plus the optional property-set and preview streams.
    fn metadata(&self, doc_info: &DocInfo) -> Metadata {
        let mut metadata = Metadata {
            version: self.header.version.to_string(),
            compressed: self.header.is_compressed(),
            encrypted: self.header.is_encrypted(),
            distribution: self.header.is_distribution(),
            declared_sections: doc_info.properties.map(|p| p.section_count),
            ..Metadata::default()
        };

        if self.options.read_summary_info && self.ole.exists(&[SUMMARY_INFO_STREAM]) {
            match self.ole.summary_information(SUMMARY_INFO_STREAM) {
                Ok(info) => {
                    metadata.title = info.title;
                    metadata.subject = info.subject;
                    metadata.author = info.author;
                    metadata.keywords = info.keywords;
                    metadata.comments = info.comments;
                    metadata.last_saved_by = info.last_saved_by;
                    metadata.created = info.create_time;
                    metadata.modified = info.last_saved_time;
                },
                Err(e) => log::warn!("unreadable summary information: {}", e),
            }
        }

        if self.options.read_preview_text && self.ole.exists(&[PREVIEW_TEXT_STREAM]) {
            match self.ole.open_stream(&[PREVIEW_TEXT_STREAM]) {
                Ok(raw) => {
                    let text = parse_utf16le_string(&raw);
                    let text = text.trim();
                    if !text.is_empty() {
                        metadata.preview_text = Some(text.to_string());
                    }
                },
                Err(e) => log::warn!("unreadable preview text: {}", e),
            }
        }

        metadata
    }
}

/// Read a root-level stream that must be present.
fn read_required(ole: &OleFile, name: &str) -> Result<Vec<u8>> {
    if !ole.exists(&[name]) {
        return Err(Error::ComponentNotFound(name.to_string()));
    }
    Ok(ole.open_stream(&[name])?)
}

/// Parse an HWP document from bytes with default options.
///
/// # Examples
///
/// ```rust,no_run
/// let bytes = std::fs::read("report.hwp")?;
/// let doc = hwp_core::parse_hwp(&bytes)?;
/// println!("{}", doc.text());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_hwp(bytes: &[u8]) -> Result<Document> {
    parse_hwp_with(bytes, &ParseOptions::default())
}

/// Parse an HWP document from bytes with explicit options.
pub fn parse_hwp_with(bytes: &[u8], options: &ParseOptions) -> Result<Document> {
    Package::from_bytes(bytes.to_vec(), options.clone())?.document()
}
