//! AST-backed structural analysis.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   ┌───────────────┐   ┌─────────────┐   ┌──────────────────┐
//! │ Source text │──▶│ tree-sitter   │──▶│ SyntaxUnit  │──▶│ TypeDeclaration  │
//! └─────────────┘   │ (syntax check)│   │ (lowering)  │   │ (assemble +      │
//!                   └───────────────┘   └─────────────┘   │  classify)       │
//!                                                         └──────────────────┘
//! ```
//!
//! Parsing and lowering are language specific (`languages/`). Everything
//! after lowering works on the closed syntax layer in `syntax` and is
//! language independent.
//!
//! # Adding a New Language
//!
//! 1. Create a new module in `src/analysis/languages/`
//! 2. Implement `LanguageAnalyzer`, lowering into `SyntaxUnit`
//! 3. Register the analyzer in `languages/mod.rs`

mod assemble;
mod classify;
mod context;
mod languages;
mod records;
mod render;
mod syntax;
mod traits;

pub use assemble::{assemble_type, assemble_unit};
pub use classify::{classify, role_for_annotation, Role, ANNOTATION_ROLES, EVENT_TYPE_PREFIX};
pub use context::{AnalysisContext, DEFAULT_MAX_NESTING_DEPTH};
pub use languages::{
    get_analyzer, get_analyzer_by_id, register_analyzers, registered_extensions, JavaAnalyzer,
};
pub use records::{
    BatchSummary, FieldInfo, FileOutcome, FileReport, MethodInfo, ParseError, Record,
    TypeDeclaration, TypeKind,
};
pub use render::{render, render_type};
pub use syntax::{
    SyntaxAnnotation, SyntaxField, SyntaxMember, SyntaxMethod, SyntaxType, SyntaxUnit, TypeRef,
    WildcardBound,
};
pub use traits::{LanguageAnalyzer, ParsedFile};
