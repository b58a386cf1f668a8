// SXML - Simple XML processing engine
//
// Copyright (c) 2025 SXML contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Recursive-descent XML parser.
//!
//! Parses a complete document: optional XML declaration, optional
//! DOCTYPE, comments and processing instructions around the root, and
//! the element tree itself. The declaration is validated and discarded
//! except for the encoding; DOCTYPE identifiers are captured; PIs are
//! skipped; comments are normalized and attached to the nearest element
//! (or to the document, outside the root).

use std::sync::Arc;

use crate::document::{Document, ElementId};
use crate::error::{XmlError, XmlResult};
use crate::lex::{decode_attribute, decode_content, Token, TokenKind, Tokenizer};
use crate::limits::Limits;
use crate::name::{
    is_valid_encoding, is_valid_public_id, is_xml_whitespace, trim_xml,
};
use crate::uri::decode_uri;
use crate::validate::SchemaValidator;
use crate::value::Scalar;

/// Options controlling a parse.
#[derive(Clone)]
pub struct ParseOptions {
    /// Resource limits for untrusted input.
    pub limits: Limits,
    /// Trim XML whitespace around character data runs. Defaults to true;
    /// CDATA sections are never trimmed.
    pub trim_chardata: bool,
    /// Optional schema validator invoked on the finished document.
    pub validator: Option<Arc<dyn SchemaValidator + Send + Sync>>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            trim_chardata: true,
            validator: None,
        }
    }
}

impl std::fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseOptions")
            .field("limits", &self.limits)
            .field("trim_chardata", &self.trim_chardata)
            .field("validator", &self.validator.is_some())
            .finish()
    }
}

impl ParseOptions {
    /// Start building a set of options.
    pub fn builder() -> ParseOptionsBuilder {
        ParseOptionsBuilder::default()
    }
}

/// Fluent builder for [`ParseOptions`].
#[derive(Default)]
pub struct ParseOptionsBuilder {
    options: ParseOptions,
}

impl ParseOptionsBuilder {
    pub fn limits(mut self, limits: Limits) -> Self {
        self.options.limits = limits;
        self
    }

    pub fn trim_chardata(mut self, trim: bool) -> Self {
        self.options.trim_chardata = trim;
        self
    }

    pub fn validator(mut self, validator: Arc<dyn SchemaValidator + Send + Sync>) -> Self {
        self.options.validator = Some(validator);
        self
    }

    pub fn build(self) -> ParseOptions {
        self.options
    }
}

/// Parse a document with default options.
pub fn parse(text: &str) -> XmlResult<Document> {
    parse_with_options(text, &ParseOptions::default())
}

/// Parse a document.
pub fn parse_with_options(text: &str, options: &ParseOptions) -> XmlResult<Document> {
    options.limits.check_input_size(text.len())?;
    let mut parser = Parser {
        tokens: Tokenizer::new(text),
        options,
        element_count: 1,
    };
    let doc = parser.parse_document()?;
    if let Some(validator) = &options.validator {
        validator.validate(text, &doc)?;
    }
    Ok(doc)
}

struct Doctype {
    name: String,
    public_id: Option<String>,
    system_id: Option<String>,
}

struct Parser<'a, 'o> {
    tokens: Tokenizer<'a>,
    options: &'o ParseOptions,
    element_count: usize,
}

impl Parser<'_, '_> {
    fn parse_document(&mut self) -> XmlResult<Document> {
        let mut encoding: Option<String> = None;
        let mut doctype: Option<Doctype> = None;
        let mut comments: Vec<String> = Vec::new();

        // The XML declaration is only legal as the very first construct.
        let first = self.expect_any()?;
        if first.kind == TokenKind::XmlDeclStart {
            encoding = self.parse_xml_decl()?;
        } else {
            self.tokens.put_back(first);
        }

        // Prolog: misc and at most one DOCTYPE before the root element.
        let mut doc = loop {
            let token = self.expect_any()?;
            match token.kind {
                TokenKind::Comment(body) => comments.push(body),
                TokenKind::Pi(_) => {}
                TokenKind::CharData(text) if trim_xml(&text).is_empty() => {}
                TokenKind::DoctypeStart => {
                    if doctype.is_some() {
                        return Err(XmlError::syntax("repeated DOCTYPE", token.line));
                    }
                    doctype = Some(self.parse_doctype(token.line)?);
                }
                TokenKind::ElementStart => {
                    let name = self.expect_name()?;
                    if let Some(dt) = &doctype {
                        if dt.name != name {
                            return Err(XmlError::syntax(
                                format!(
                                    "root element <{}> does not match DOCTYPE name '{}'",
                                    name, dt.name
                                ),
                                token.line,
                            ));
                        }
                    }
                    let mut doc = Document::new(name)?;
                    let root = doc.root();
                    self.parse_element_body(&mut doc, root, 1)?;
                    break doc;
                }
                TokenKind::XmlDeclStart => {
                    return Err(XmlError::syntax(
                        "XML declaration must be the first construct",
                        token.line,
                    ));
                }
                other => {
                    return Err(XmlError::syntax(
                        format!("unexpected {} before the root element", other),
                        token.line,
                    ));
                }
            }
        };

        // Epilog: only misc may follow the root.
        while let Some(token) = self.tokens.next()? {
            match token.kind {
                TokenKind::Comment(body) => comments.push(body),
                TokenKind::Pi(_) => {}
                TokenKind::CharData(text) if trim_xml(&text).is_empty() => {}
                other => {
                    return Err(XmlError::syntax(
                        format!("unexpected {} after the root element", other),
                        token.line,
                    ));
                }
            }
        }

        if let Some(encoding) = encoding {
            doc.set_encoding(encoding)?;
        }
        if let Some(dt) = doctype {
            if let Some(id) = dt.public_id {
                doc.set_dtd_public_id(id);
            }
            if let Some(id) = dt.system_id {
                doc.set_dtd_system_id(id);
            }
        }
        let comment = join_comments(&comments);
        if !comment.is_empty() {
            doc.set_document_comment(comment)?;
        }
        Ok(doc)
    }

    /// Parse `version="1.0" [encoding="..."] [standalone="yes|no"] ?>`,
    /// returning the declared encoding.
    fn parse_xml_decl(&mut self) -> XmlResult<Option<String>> {
        let mut encoding = None;
        let mut first = true;
        loop {
            let token = self.expect_any()?;
            let name = match token.kind {
                TokenKind::PiStop => {
                    if first {
                        return Err(XmlError::syntax(
                            "XML declaration is missing the version",
                            token.line,
                        ));
                    }
                    return Ok(encoding);
                }
                TokenKind::Name(name) => name,
                other => {
                    return Err(XmlError::syntax(
                        format!("unexpected {} in XML declaration", other),
                        token.line,
                    ));
                }
            };
            let line = token.line;
            self.expect_kind(&TokenKind::Equals)?;
            let value = self.expect_literal()?;
            match name.as_str() {
                "version" if first => {
                    if value.is_empty() {
                        return Err(XmlError::syntax("empty XML version", line));
                    }
                }
                "version" => {
                    return Err(XmlError::syntax("misplaced version attribute", line));
                }
                "encoding" => {
                    if !is_valid_encoding(&value) {
                        return Err(XmlError::syntax(
                            format!("illegal encoding: {:?}", value),
                            line,
                        ));
                    }
                    encoding = Some(value);
                }
                "standalone" => {
                    if value != "yes" && value != "no" {
                        return Err(XmlError::syntax(
                            "standalone must be 'yes' or 'no'",
                            line,
                        ));
                    }
                }
                other => {
                    return Err(XmlError::syntax(
                        format!("unexpected attribute '{}' in XML declaration", other),
                        line,
                    ));
                }
            }
            first = false;
        }
    }

    /// Parse the remainder of `<!DOCTYPE name [PUBLIC lit lit | SYSTEM lit] [subset] >`.
    fn parse_doctype(&mut self, line: usize) -> XmlResult<Doctype> {
        let name = self.expect_name()?;
        let mut public_id = None;
        let mut system_id = None;
        let token = self.expect_any()?;
        match &token.kind {
            TokenKind::Name(kw) if kw == "PUBLIC" => {
                let raw = self.expect_literal()?;
                let id = decode_attribute(&raw, line)?.into_owned();
                if !is_valid_public_id(&id) {
                    return Err(XmlError::syntax(
                        format!("illegal public identifier: {:?}", id),
                        line,
                    ));
                }
                public_id = Some(id);
                let raw = self.expect_literal()?;
                system_id = Some(decode_uri(&decode_attribute(&raw, line)?)?);
            }
            TokenKind::Name(kw) if kw == "SYSTEM" => {
                let raw = self.expect_literal()?;
                system_id = Some(decode_uri(&decode_attribute(&raw, line)?)?);
            }
            _ => self.tokens.put_back(token),
        }
        self.tokens.skip_internal_subset()?;
        self.expect_kind(&TokenKind::ElementStop)?;
        Ok(Doctype {
            name,
            public_id,
            system_id,
        })
    }

    /// Parse attributes and content of an element whose `<` and name have
    /// already been consumed.
    fn parse_element_body(
        &mut self,
        doc: &mut Document,
        id: ElementId,
        depth: usize,
    ) -> XmlResult<()> {
        let limits = &self.options.limits;
        limits.check_depth(depth, self.tokens.line())?;
        limits.check_name_length(doc.name(id).len(), self.tokens.line())?;

        // Attribute list.
        loop {
            let token = self.expect_any()?;
            match token.kind {
                TokenKind::Name(name) => {
                    limits.check_name_length(name.len(), token.line)?;
                    self.expect_kind(&TokenKind::Equals)?;
                    let raw = self.expect_literal()?;
                    if doc.attribute(id, &name).is_some() {
                        return Err(XmlError::syntax(
                            format!("repeated attribute '{}'", name),
                            token.line,
                        ));
                    }
                    let value = decode_attribute(&raw, token.line)?.into_owned();
                    doc.set_attribute(id, name, value)?;
                    limits.check_attributes(doc.attribute_count(id), token.line)?;
                }
                TokenKind::EmptyStop => return Ok(()),
                TokenKind::ElementStop => break,
                other => {
                    return Err(XmlError::syntax(
                        format!("unexpected {} in start tag", other),
                        token.line,
                    ));
                }
            }
        }

        // Content: character data, CDATA, comments, PIs and children,
        // terminated by the matching end tag.
        let mut text = String::new();
        let mut comments: Vec<String> = Vec::new();
        loop {
            let token = self.expect_any()?;
            match token.kind {
                TokenKind::CharData(raw) => {
                    let raw = if self.options.trim_chardata {
                        trim_xml(&raw).to_string()
                    } else {
                        raw
                    };
                    if !raw.is_empty() {
                        text.push_str(&decode_content(&raw, token.line)?);
                        limits.check_text_length(text.len(), token.line)?;
                    }
                }
                TokenKind::CData(raw) => {
                    text.push_str(&raw);
                    limits.check_text_length(text.len(), token.line)?;
                }
                TokenKind::Comment(body) => comments.push(body),
                TokenKind::Pi(_) => {}
                TokenKind::ElementStart => {
                    let name = self.expect_name()?;
                    self.element_count += 1;
                    limits.check_elements(self.element_count, token.line)?;
                    let child = doc.add_element(id, name)?;
                    self.parse_element_body(doc, child, depth + 1)?;
                }
                TokenKind::EndTagStart => {
                    let name = self.expect_name()?;
                    if name != doc.name(id) {
                        return Err(XmlError::syntax(
                            format!(
                                "mismatched end tag: expected </{}>, found </{}>",
                                doc.name(id),
                                name
                            ),
                            token.line,
                        ));
                    }
                    self.expect_kind(&TokenKind::ElementStop)?;
                    break;
                }
                other => {
                    return Err(XmlError::syntax(
                        format!("unexpected {} in element content", other),
                        token.line,
                    ));
                }
            }
        }

        // An element is terminal or a container, decided here: text only
        // becomes the value when no child elements were seen.
        if doc.children(id).is_empty() && !text.is_empty() {
            doc.set_value(id, Scalar::Text(text))?;
        }
        let comment = join_comments(&comments);
        if !comment.is_empty() {
            doc.set_comment(id, comment)?;
        }
        Ok(())
    }

    // ---- token helpers ----

    fn expect_any(&mut self) -> XmlResult<Token> {
        self.tokens.next()?.ok_or_else(|| {
            XmlError::syntax("unexpected end of input", self.tokens.line())
        })
    }

    fn expect_kind(&mut self, expected: &TokenKind) -> XmlResult<()> {
        let token = self.expect_any()?;
        if token.kind == *expected {
            Ok(())
        } else {
            Err(XmlError::syntax(
                format!("expected {}, found {}", expected, token.kind),
                token.line,
            ))
        }
    }

    fn expect_name(&mut self) -> XmlResult<String> {
        let token = self.expect_any()?;
        match token.kind {
            TokenKind::Name(name) => Ok(name),
            other => Err(XmlError::syntax(
                format!("expected a name, found {}", other),
                token.line,
            )),
        }
    }

    fn expect_literal(&mut self) -> XmlResult<String> {
        let token = self.expect_any()?;
        match token.kind {
            TokenKind::Literal(text) => Ok(text),
            other => Err(XmlError::syntax(
                format!("expected a quoted literal, found {}", other),
                token.line,
            )),
        }
    }
}

/// Normalize a raw comment body: strip the indentation of the first
/// non-blank line from every line, right-trim, and collapse runs of
/// blank lines to a single separator.
fn normalize_comment(raw: &str) -> String {
    let strip = raw
        .lines()
        .find(|line| !trim_xml(line).is_empty())
        .map(|line| line.len() - line.trim_start_matches(is_xml_whitespace).len())
        .unwrap_or(0);
    let mut out = String::new();
    let mut started = false;
    let mut pending_blank = false;
    for line in raw.lines() {
        let line = strip_indent(line, strip);
        let line = line.trim_end_matches(is_xml_whitespace);
        if line.is_empty() {
            pending_blank = started;
            continue;
        }
        if started {
            out.push('\n');
            if pending_blank {
                out.push('\n');
            }
        }
        out.push_str(line);
        started = true;
        pending_blank = false;
    }
    out
}

/// Remove up to `width` bytes of leading XML whitespace.
fn strip_indent(line: &str, width: usize) -> &str {
    let mut taken = 0;
    for ch in line.chars() {
        if taken >= width || !is_xml_whitespace(ch) {
            break;
        }
        taken += ch.len_utf8();
    }
    &line[taken..]
}

/// Join several normalized comment blocks with newlines, dropping the
/// empty ones.
fn join_comments(raw: &[String]) -> String {
    raw.iter()
        .map(|body| normalize_comment(body))
        .filter(|body| !body.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XmlErrorKind;

    // ==================== Document structure tests ====================

    #[test]
    fn test_parse_minimal() {
        let doc = parse("<a/>").unwrap();
        assert_eq!(doc.name(doc.root()), "a");
        assert!(doc.value(doc.root()).is_empty());
    }

    #[test]
    fn test_parse_nested_elements() {
        let doc = parse("<a><b><c>x</c></b></a>").unwrap();
        let root = doc.root();
        let b = doc.get_element(root, "b").unwrap();
        let c = doc.get_element(b, "c").unwrap();
        assert_eq!(doc.value(c).text(), "x");
    }

    #[test]
    fn test_parse_attributes() {
        let doc = parse(r#"<a x="1" y='two'/>"#).unwrap();
        let root = doc.root();
        assert_eq!(doc.attribute(root, "x").unwrap().text(), "1");
        assert_eq!(doc.attribute(root, "y").unwrap().text(), "two");
    }

    #[test]
    fn test_repeated_attribute_is_error() {
        let err = parse(r#"<a x="1" x="2"/>"#).unwrap_err();
        assert_eq!(err.kind, XmlErrorKind::Syntax);
    }

    #[test]
    fn test_mismatched_end_tag() {
        let err = parse("<a><b></a></b>").unwrap_err();
        assert!(err.message.contains("</b>"));
    }

    #[test]
    fn test_trailing_garbage() {
        assert!(parse("<a/><b/>").is_err());
        assert!(parse("<a/>junk").is_err());
    }

    #[test]
    fn test_whitespace_and_misc_around_root() {
        let doc = parse("\n <!-- head -->\n<a/>\n<!-- tail -->\n").unwrap();
        assert_eq!(doc.document_comment(), Some("head\ntail"));
    }

    // ==================== Character data tests ====================

    #[test]
    fn test_chardata_trimmed_and_decoded() {
        let doc = parse("<a>  1 &lt; 2  </a>").unwrap();
        assert_eq!(doc.value(doc.root()).text(), "1 < 2");
    }

    #[test]
    fn test_chardata_untrimmed_option() {
        let options = ParseOptions::builder().trim_chardata(false).build();
        let doc = parse_with_options("<a> x </a>", &options).unwrap();
        assert_eq!(doc.value(doc.root()).text(), " x ");
    }

    #[test]
    fn test_cdata_is_raw_and_untrimmed() {
        let doc = parse("<a><![CDATA[ <b> & ]]></a>").unwrap();
        assert_eq!(doc.value(doc.root()).text(), " <b> & ");
    }

    #[test]
    fn test_chardata_runs_concatenate() {
        let doc = parse("<a>one<!-- skip -->two</a>").unwrap();
        assert_eq!(doc.value(doc.root()).text(), "onetwo");
    }

    #[test]
    fn test_container_discards_interleaved_text() {
        let doc = parse("<a>noise<b/>more</a>").unwrap();
        let root = doc.root();
        assert!(doc.value(root).is_empty());
        assert_eq!(doc.children(root).len(), 1);
    }

    // ==================== XML declaration tests ====================

    #[test]
    fn test_xml_decl_with_encoding() {
        let doc = parse("<?xml version=\"1.0\" encoding=\"UTF-8\"?><a/>").unwrap();
        assert_eq!(doc.encoding(), Some("UTF-8"));
    }

    #[test]
    fn test_xml_decl_standalone() {
        assert!(parse("<?xml version='1.0' standalone='yes'?><a/>").is_ok());
        assert!(parse("<?xml version='1.0' standalone='maybe'?><a/>").is_err());
    }

    #[test]
    fn test_xml_decl_requires_version() {
        assert!(parse("<?xml encoding='UTF-8'?><a/>").is_err());
        assert!(parse("<?xml?><a/>").is_err());
    }

    #[test]
    fn test_xml_decl_must_be_first() {
        assert!(parse("<!-- c --><?xml version='1.0'?><a/>").is_err());
    }

    #[test]
    fn test_bad_encoding_in_decl() {
        assert!(parse("<?xml version='1.0' encoding='8bit'?><a/>").is_err());
    }

    // ==================== DOCTYPE tests ====================

    #[test]
    fn test_doctype_system() {
        let doc = parse("<!DOCTYPE a SYSTEM \"a.dtd\"><a/>").unwrap();
        assert_eq!(doc.dtd_system_id(), Some("a.dtd"));
        assert_eq!(doc.dtd_public_id(), None);
    }

    #[test]
    fn test_doctype_public() {
        let doc = parse(
            "<!DOCTYPE a PUBLIC \"-//X//DTD a//EN\" \"http://x/a.dtd\"><a/>",
        )
        .unwrap();
        assert_eq!(doc.dtd_public_id(), Some("-//X//DTD a//EN"));
        assert_eq!(doc.dtd_system_id(), Some("http://x/a.dtd"));
    }

    #[test]
    fn test_doctype_system_id_uri_decoded() {
        let doc = parse("<!DOCTYPE a SYSTEM \"a%20b.dtd\"><a/>").unwrap();
        assert_eq!(doc.dtd_system_id(), Some("a b.dtd"));
    }

    #[test]
    fn test_doctype_name_must_match_root() {
        assert!(parse("<!DOCTYPE a><b/>").is_err());
        assert!(parse("<!DOCTYPE a><a/>").is_ok());
    }

    #[test]
    fn test_doctype_internal_subset_skipped() {
        let doc = parse("<!DOCTYPE a [ <!ELEMENT a EMPTY> ]><a/>").unwrap();
        assert_eq!(doc.name(doc.root()), "a");
    }

    // ==================== Comment tests ====================

    #[test]
    fn test_element_comment_attached() {
        let doc = parse("<a><!-- note --><b/></a>").unwrap();
        assert_eq!(doc.comment(doc.root()), Some("note"));
    }

    #[test]
    fn test_comment_indentation_normalized() {
        let doc = parse("<a><!--\n    line one\n      line two\n--></a>").unwrap();
        assert_eq!(doc.comment(doc.root()), Some("line one\n  line two"));
    }

    #[test]
    fn test_comment_blank_runs_collapse() {
        let doc = parse("<a><!--\none\n\n\n\ntwo\n--></a>").unwrap();
        assert_eq!(doc.comment(doc.root()), Some("one\n\ntwo"));
    }

    #[test]
    fn test_multiple_comments_joined() {
        let doc = parse("<a><!-- one --><b/><!-- two --></a>").unwrap();
        assert_eq!(doc.comment(doc.root()), Some("one\ntwo"));
    }

    // ==================== Limit tests ====================

    #[test]
    fn test_depth_limit() {
        let options = ParseOptions::builder()
            .limits(Limits {
                max_depth: 2,
                ..Limits::default()
            })
            .build();
        assert!(parse_with_options("<a><b/></a>", &options).is_ok());
        assert!(parse_with_options("<a><b><c/></b></a>", &options).is_err());
    }

    #[test]
    fn test_element_count_limit() {
        let options = ParseOptions::builder()
            .limits(Limits {
                max_elements: 2,
                ..Limits::default()
            })
            .build();
        assert!(parse_with_options("<a><b/></a>", &options).is_ok());
        assert!(parse_with_options("<a><b/><c/></a>", &options).is_err());
    }

    #[test]
    fn test_input_size_limit() {
        let options = ParseOptions::builder()
            .limits(Limits {
                max_input_size: 4,
                ..Limits::default()
            })
            .build();
        assert!(parse_with_options("<a/>", &options).is_ok());
        assert!(parse_with_options("<ab/>", &options).is_err());
    }

    // ==================== Validator hook tests ====================

    struct RootMustBe(&'static str);

    impl SchemaValidator for RootMustBe {
        fn validate(&self, _source: &str, doc: &Document) -> XmlResult<()> {
            if doc.name(doc.root()) == self.0 {
                Ok(())
            } else {
                Err(XmlError::validation(format!(
                    "expected root <{}>",
                    self.0
                )))
            }
        }
    }

    #[test]
    fn test_validator_invoked() {
        let options = ParseOptions::builder()
            .validator(Arc::new(RootMustBe("config")))
            .build();
        assert!(parse_with_options("<config/>", &options).is_ok());
        let err = parse_with_options("<other/>", &options).unwrap_err();
        assert_eq!(err.kind, XmlErrorKind::Validation);
    }

    // ==================== Comment normalization unit tests ====================

    #[test]
    fn test_normalize_comment_single_line() {
        assert_eq!(normalize_comment("  hello  "), "hello");
    }

    #[test]
    fn test_normalize_comment_empty() {
        assert_eq!(normalize_comment("   \n  \n"), "");
    }
}
