//! # Declarative Queries
//!
//! The query execution path does not address documents by key directly;
//! it hands the store a declarative expression to run. A [`Query`] carries
//! both the rendered expression text (what a wire client would send, and
//! what gets logged) and the structured operation the in-memory backend
//! interprets.

use serde_json::json;

use super::document::Document;

/// Options attached to a mutating query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Skip constraint violations (duplicate key on insert, missing
    /// document on update/remove) instead of propagating them. Never
    /// applies to connectivity failures.
    pub ignore_errors: bool,
}

/// The structured operation behind a query expression.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOp {
    /// Insert a document.
    Insert { document: Document },
    /// Insert a document, or merge its fields into the existing one with
    /// the same key.
    Upsert { document: Document },
    /// Return every document whose key equals the given one.
    ReadByKey { key: String },
    /// Merge the patch fields into the document with the given key.
    UpdateByKey { key: String, patch: Document },
    /// Remove the document with the given key.
    RemoveByKey { key: String },
}

/// A declarative query against one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    text: String,
    op: QueryOp,
    options: QueryOptions,
}

impl Query {
    /// Declarative insert of a full document.
    pub fn insert(collection: &str, document: Document, options: QueryOptions) -> Self {
        let text = format!(
            "INSERT {} INTO {}{}",
            json!(document),
            collection,
            options_clause(options)
        );
        Self {
            text,
            op: QueryOp::Insert { document },
            options,
        }
    }

    /// Insert keyed by `_key`, updating the existing document on collision.
    pub fn upsert(collection: &str, document: Document, options: QueryOptions) -> Self {
        let key = document.key().unwrap_or_default();
        let text = format!(
            "UPSERT {{ _key: {} }} INSERT {} UPDATE {} IN {}{}",
            json!(key),
            json!(document),
            json!(document),
            collection,
            options_clause(options)
        );
        Self {
            text,
            op: QueryOp::Upsert { document },
            options,
        }
    }

    /// Filter-and-return over all documents matching key equality.
    pub fn read_by_key(collection: &str, key: &str) -> Self {
        let text = format!(
            "FOR item IN {} FILTER item._key == {} RETURN item",
            collection,
            json!(key)
        );
        Self {
            text,
            op: QueryOp::ReadByKey { key: key.to_string() },
            options: QueryOptions::default(),
        }
    }

    /// Update-by-key with merge fields.
    pub fn update_by_key(collection: &str, key: &str, patch: Document, options: QueryOptions) -> Self {
        let text = format!(
            "UPDATE {} WITH {} IN {}{}",
            json!(key),
            json!(patch),
            collection,
            options_clause(options)
        );
        Self {
            text,
            op: QueryOp::UpdateByKey {
                key: key.to_string(),
                patch,
            },
            options,
        }
    }

    /// Remove-by-key.
    pub fn remove_by_key(collection: &str, key: &str, options: QueryOptions) -> Self {
        let text = format!("REMOVE {} IN {}{}", json!(key), collection, options_clause(options));
        Self {
            text,
            op: QueryOp::RemoveByKey { key: key.to_string() },
            options,
        }
    }

    /// The rendered expression text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The structured operation.
    pub fn op(&self) -> &QueryOp {
        &self.op
    }

    /// Options in effect for this query.
    pub fn options(&self) -> QueryOptions {
        self.options
    }
}

fn options_clause(options: QueryOptions) -> &'static str {
    if options.ignore_errors {
        " OPTIONS { ignoreErrors: true }"
    } else {
        ""
    }
}
