//! Candidate languages and tree-sitter grammar loading for the model engine

use tree_sitter::Language;

/// Languages the grammar model can score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    TypeScript,
    JavaScript,
    Rust,
    Python,
    Go,
    Java,
    C,
    Cpp,
    Kotlin,
    Html,
    Css,
    Json,
    Yaml,
    Toml,
    Xml,
    Hcl,
    /// Shell/Bash scripts
    Bash,
}

impl Lang {
    /// Every candidate, in tie-break order
    pub const ALL: [Lang; 17] = [
        Self::TypeScript,
        Self::JavaScript,
        Self::Python,
        Self::Rust,
        Self::Go,
        Self::Java,
        Self::C,
        Self::Cpp,
        Self::Kotlin,
        Self::Html,
        Self::Css,
        Self::Json,
        Self::Yaml,
        Self::Toml,
        Self::Xml,
        Self::Hcl,
        Self::Bash,
    ];

    /// Short, extension-style id reported in predictions
    pub fn model_id(&self) -> &'static str {
        match self {
            Self::TypeScript => "ts",
            Self::JavaScript => "js",
            Self::Rust => "rs",
            Self::Python => "py",
            Self::Go => "go",
            Self::Java => "java",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Kotlin => "kt",
            Self::Html => "html",
            Self::Css => "css",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Xml => "xml",
            Self::Hcl => "tf",
            Self::Bash => "sh",
        }
    }

    /// Get the canonical name of the language
    pub fn name(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Rust => "rust",
            Self::Python => "python",
            Self::Go => "go",
            Self::Java => "java",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Kotlin => "kotlin",
            Self::Html => "html",
            Self::Css => "css",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Xml => "xml",
            Self::Hcl => "hcl",
            Self::Bash => "bash",
        }
    }

    /// Get the tree-sitter Language for parsing
    pub fn tree_sitter_language(&self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::Go => tree_sitter_go::LANGUAGE.into(),
            Self::Java => tree_sitter_java::LANGUAGE.into(),
            Self::C => tree_sitter_c::LANGUAGE.into(),
            Self::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Self::Kotlin => tree_sitter_kotlin_ng::LANGUAGE.into(),
            Self::Html => tree_sitter_html::LANGUAGE.into(),
            Self::Css => tree_sitter_css::language().into(),
            Self::Json => tree_sitter_json::LANGUAGE.into(),
            Self::Yaml => tree_sitter_yaml::language().into(),
            Self::Toml => tree_sitter_toml_ng::language().into(),
            Self::Xml => tree_sitter_xml::LANGUAGE_XML.into(),
            Self::Hcl => tree_sitter_hcl::LANGUAGE.into(),
            Self::Bash => tree_sitter_bash::LANGUAGE.into(),
        }
    }

    /// Substrings that are characteristic of the language
    ///
    /// Grammars are permissive (most snippets parse cleanly as YAML or
    /// JavaScript), so the model weighs these alongside the parse result.
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            Self::TypeScript => &[
                ": string", ": number", ": boolean", "interface ", "export type ", "implements ",
                "readonly ", "as const",
            ],
            Self::JavaScript => &[
                "function ", "const ", "=> ", "console.log", "require(", "module.exports",
                "document.", "===",
            ],
            Self::Rust => &[
                "fn ", "let mut ", "impl ", "pub ", "&self", "-> ", "#[", "println!", "use std::",
            ],
            Self::Python => &[
                "def ", "self.", "elif ", "print(", "None", "lambda ", "__init__", "import ",
            ],
            Self::Go => &["func ", "package ", ":=", "fmt.", "defer ", "chan ", "nil"],
            Self::Java => &[
                "public class ", "public static void", "System.out", "import java.", "@Override",
                "private ", "extends ",
            ],
            Self::C => &["#include <", "int main", "printf(", "malloc(", "sizeof(", "NULL", "->"],
            Self::Cpp => &[
                "#include <", "std::", "cout", "template<", "template <", "namespace ", "nullptr",
                "public:",
            ],
            Self::Kotlin => &["fun ", "val ", "println(", "data class ", "companion object", "?."],
            Self::Html => &["<!DOCTYPE", "<html", "<div", "<body", "<head", "</", "class=\""],
            Self::Css => &["color:", "margin:", "padding:", "px;", "font-", "@media", "display:"],
            Self::Json => &["{\"", "\":", "\",", "null", "true"],
            Self::Yaml => &["---", "\n- ", ": "],
            Self::Toml => &["[package]", "[dependencies]", " = \"", "[[", "[tool."],
            Self::Xml => &["<?xml", "xmlns", "/>", "<!--", "</"],
            Self::Hcl => &[
                "resource \"", "variable \"", "provider \"", "module \"", "output \"",
                "terraform {",
            ],
            Self::Bash => &["#!/bin/", "echo ", "then", "fi", "esac", "$(", "${", "export "],
        }
    }
}
