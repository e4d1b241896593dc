use zen_reader::encoding::{decode_html, sniff_encoding, EncodingSource};
use zen_reader::extract_bytes;

fn article_bytes(meta: &[u8], paragraph: &[u8]) -> Vec<u8> {
    let mut html = b"<html><head>".to_vec();
    html.extend_from_slice(meta);
    html.extend_from_slice(b"<title>Encoding Test Article</title></head><body><article>");
    for _ in 0..12 {
        html.extend_from_slice(b"<p>");
        html.extend_from_slice(paragraph);
        html.extend_from_slice(b"</p>");
    }
    html.extend_from_slice(b"</article></body></html>");
    html
}

#[test]
fn utf8_content_handled_correctly() {
    let html = article_bytes(
        b"<meta charset=\"utf-8\">",
        "UTF-8 content with special characters: \u{e9}, \u{f1}, \u{fc}, \u{4e2d}\u{6587}.".as_bytes(),
    );

    let article = extract_bytes(&html).unwrap();
    let text = article.text_content();

    assert!(text.contains("UTF-8 content"));
    assert!(text.contains('\u{e9}'));
    assert!(text.contains('\u{f1}'));
    assert!(text.contains("\u{4e2d}\u{6587}"));
}

#[test]
fn iso88591_converted_to_utf8() {
    let html = article_bytes(
        b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=ISO-8859-1\">",
        b"Na\xefve caf\xe9 customers order cr\xe8me br\xfbl\xe9e every single afternoon.",
    );

    let article = extract_bytes(&html).unwrap();
    let text = article.text_content();

    assert!(text.contains("Na\u{ef}ve caf\u{e9}"));
    assert!(text.contains("cr\u{e8}me br\u{fb}l\u{e9}e"));
    assert!(!text.contains('\u{fffd}'));
}

#[test]
fn shift_jis_declared_by_meta() {
    let (encoded, _, _) = encoding_rs::SHIFT_JIS.encode("日本語の記事本文です。読みやすい形で表示されます。");
    let html = article_bytes(b"<meta charset=\"Shift_JIS\">", &encoded);

    assert_eq!(sniff_encoding(&html), (encoding_rs::SHIFT_JIS, EncodingSource::MetaDeclaration));
    let article = extract_bytes(&html).unwrap();
    assert!(article.text_content().contains("日本語の記事本文です。"));
}

#[test]
fn bom_overrides_conflicting_meta() {
    let mut html = vec![0xEF, 0xBB, 0xBF];
    html.extend_from_slice(&article_bytes(
        b"<meta charset=\"windows-1252\">",
        "Caf\u{e9} served with a BOM that wins over the declared charset.".as_bytes(),
    ));

    assert_eq!(sniff_encoding(&html).1, EncodingSource::ByteOrderMark);
    let decoded = decode_html(&html);
    assert!(decoded.starts_with("<html>"));
    assert!(decoded.contains("Caf\u{e9} served"));
}

#[test]
fn undeclared_bytes_default_to_utf8_with_replacement() {
    let html = article_bytes(b"", b"Broken \xff byte in an otherwise ordinary paragraph of article text.");

    assert_eq!(sniff_encoding(&html).1, EncodingSource::Default);
    let article = extract_bytes(&html).unwrap();
    assert!(article.text_content().contains("Broken \u{fffd} byte"));
}

#[test]
fn late_declaration_is_ignored() {
    let mut html = b"<html><head>".to_vec();
    html.extend_from_slice(&vec![b' '; 2048]);
    html.extend_from_slice(b"<meta charset=\"windows-1252\"></head><body>caf\xe9</body></html>");

    assert_eq!(sniff_encoding(&html).1, EncodingSource::Default);
    assert!(decode_html(&html).contains("caf\u{fffd}"));
}
