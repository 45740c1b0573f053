//! Builders for archives, PDFs and report texts.

use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use lopdf::{dictionary, Document, Object, Stream};
use zip::write::SimpleFileOptions;

use parcelamento::error::ProcessError;
use parcelamento::processor::{ExtractedText, TextExtractor};

/// Page separator understood by [`PlainTextExtractor`].
pub const PAGE_BREAK: char = '\u{c}';

/// Builds a zip archive. Names ending in `/` become directory entries.
pub fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Builds a fiscal report as plain text, one page per section.
pub struct ReportBuilder {
    company: Option<String>,
    rf_section: Option<Vec<String>>,
    pgfn_section: Option<Vec<String>>,
    pgfn_first: bool,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self {
            company: None,
            rf_section: None,
            pgfn_section: None,
            pgfn_first: false,
        }
    }

    pub fn company(mut self, name: &str) -> Self {
        self.company = Some(name.to_string());
        self
    }

    pub fn receita_federal(mut self, installment: bool) -> Self {
        let status = if installment {
            "EM PARCELAMENTO"
        } else {
            "SEM PENDENCIAS"
        };
        self.rf_section = Some(vec![
            "Diagnóstico Fiscal na Receita Federal".to_string(),
            format!("Débito SIEFPAR - {}", status),
        ]);
        self
    }

    pub fn pgfn(mut self, installment: bool) -> Self {
        let line = if installment {
            "Pendência - Parcelamento (SISPAR)"
        } else {
            "Não foram detectadas pendências/exigibilidades suspensas"
        };
        self.pgfn_section = Some(vec![
            "Diagnóstico Fiscal na Procuradoria-Geral da Fazenda Nacional".to_string(),
            line.to_string(),
        ]);
        self
    }

    pub fn pgfn_first(mut self) -> Self {
        self.pgfn_first = true;
        self
    }

    pub fn pages(&self) -> Vec<Vec<String>> {
        let mut header = vec!["MINISTÉRIO DA FAZENDA".to_string()];
        if let Some(company) = &self.company {
            header.push(format!("CNPJ: 12.345.678 - {}", company));
        }

        let mut pages = vec![header];
        let sections = if self.pgfn_first {
            [&self.pgfn_section, &self.rf_section]
        } else {
            [&self.rf_section, &self.pgfn_section]
        };
        for section in sections.into_iter().flatten() {
            pages.push(section.clone());
        }
        pages
    }

    /// Text for [`PlainTextExtractor`].
    pub fn text(&self) -> Vec<u8> {
        let pages: Vec<String> = self.pages().iter().map(|lines| lines.join("\n")).collect();
        pages.join(&PAGE_BREAK.to_string()).into_bytes()
    }

    /// A real PDF with one text line per `BT`/`ET` block.
    pub fn pdf(&self) -> Vec<u8> {
        pdf_document(&self.pages())
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Treats input bytes as UTF-8 text with pages split on [`PAGE_BREAK`].
/// Invalid UTF-8 is a read failure.
#[derive(Default)]
pub struct PlainTextExtractor {
    calls: AtomicUsize,
}

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ProcessError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ProcessError::DocumentRead(format!("Invalid document: {}", e)))?;
        Ok(ExtractedText::from_pages(
            text.split(PAGE_BREAK).map(str::to_string).collect(),
        ))
    }
}

/// Builds a PDF using a WinAnsi Helvetica font. Characters outside Latin-1
/// are replaced with `?`.
pub fn pdf_document(pages: &[Vec<String>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut content = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let y = 740 - (i as i64) * 20;
            content.extend_from_slice(format!("BT /F1 11 Tf 50 {} Td (", y).as_bytes());
            content.extend(latin1_escaped(line));
            content.extend_from_slice(b") Tj ET\n");
        }
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn latin1_escaped(line: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(line.len());
    for c in line.chars() {
        let byte = u8::try_from(u32::from(c)).unwrap_or(b'?');
        if matches!(byte, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out
}
