//! Build script for minifying the embedded page runtime and stylesheet.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;
use std::fs;
use std::path::Path;

const RUNTIME_JS: &str = "src/embed/page/runtime.js";
const SITE_CSS: &str = "src/embed/page/site.css";

/// Globals the runtime reads; they are replaced with JSON after minification.
const PLACEHOLDERS: [&str; 3] = [
    "__FOLIO_SECTIONS__",
    "__FOLIO_ROOT_MARGIN__",
    "__FOLIO_THRESHOLDS__",
];

fn main() {
    let out_dir = std::env::var("OUT_DIR").unwrap();
    let out_path = Path::new(&out_dir);

    minify_js_file(RUNTIME_JS, &out_path.join("runtime.min.js"));
    minify_css_file(SITE_CSS, &out_path.join("site.min.css"));

    println!("cargo:rerun-if-changed={RUNTIME_JS}");
    println!("cargo:rerun-if-changed={SITE_CSS}");
}

fn minify_js(source: &str) -> String {
    let allocator = Allocator::default();
    let source_type = SourceType::mjs();

    let ret = Parser::new(&allocator, source, source_type).parse();
    assert!(ret.errors.is_empty(), "Parse errors: {:?}", ret.errors);

    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);

    Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code
}

fn minify_js_file(input: &str, output: &Path) {
    let source = fs::read_to_string(input).expect("Failed to read JS file");
    let code = minify_js(&source);
    for placeholder in PLACEHOLDERS {
        assert!(
            code.contains(placeholder),
            "{input} lost placeholder {placeholder} during minification"
        );
    }
    fs::write(output, code).expect("Failed to write minified JS");
}

fn minify_css(source: &str) -> String {
    let stylesheet =
        StyleSheet::parse(source, ParserOptions::default()).expect("Failed to parse CSS");
    stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..Default::default()
        })
        .expect("Failed to minify CSS")
        .code
}

fn minify_css_file(input: &str, output: &Path) {
    let source = fs::read_to_string(input).expect("Failed to read CSS file");
    let code = minify_css(&source);
    fs::write(output, code).expect("Failed to write minified CSS");
}
