#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use boleto_core::pdf::{self, TextExtractor};
use boleto_core::store::{self, BoletoStore};
use boleto_core::{BoletoRecord, ExtractionPipeline, MemoryStore, StoreError};

pub const MARKER: &str = "Alguma frase para identificar o boleto";

pub const VALID_BILL: &str = "Alguma frase para identificar o boleto
Fatura de Internet
Codigo da instalacao: 123456789012
Codigo do cliente: 87654321
Emissao: 20/05/2024
Leitura: 28 mai 24
Vencimento: 15/06/2024
Total a pagar: R$ 129,90
83640000001-2 29900048100-5 12345678901-3 23456789012-4
";

pub const VALID_BARCODE: &str = "836400000012299000481005123456789013234567890124";

/// Treats the uploaded bytes as the document's text.
pub struct Utf8Text;

impl TextExtractor for Utf8Text {
    fn extract_text(&self, data: &[u8]) -> pdf::Result<String> {
        Ok(String::from_utf8_lossy(data).into_owned())
    }
}

/// Store that refuses every insert.
pub struct BrokenStore;

#[async_trait]
impl BoletoStore for BrokenStore {
    async fn insert(&self, _record: &BoletoRecord) -> store::Result<i64> {
        Err(StoreError::Backend("disk full".to_string()))
    }
}

pub fn text_pipeline() -> (ExtractionPipeline, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let pipeline = ExtractionPipeline::new(Arc::new(Utf8Text), store.clone());
    (pipeline, store)
}

/// Build a one-page PDF printing each line with a standard font.
pub fn build_pdf(lines: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 10.into()]),
        Operation::new("Td", vec![40.into(), 780.into()]),
    ];
    for line in lines {
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("Td", vec![0.into(), (-24).into()]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut data = Vec::new();
    doc.save_to(&mut data).unwrap();
    data
}
