//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use clood::{AttributeType, Similarity, TokenLifetime};

/// Clood: case-base configuration, ingestion and query toolkit
#[derive(Parser)]
#[command(name = "clood")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL of the CBR API (overrides CLOOD_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// API token (overrides CLOOD_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create, list, delete, export and import projects
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Edit a project's attribute schema
    Attributes {
        #[command(subcommand)]
        action: AttributeAction,
    },

    /// Show the similarity options available per attribute type
    Catalog {
        /// Use the built-in defaults instead of asking the server
        #[arg(long)]
        offline: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a CSV case file against a project's attributes
    Ingest {
        /// Path to the case file (CSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Project id
        #[arg(short, long)]
        project: String,

        /// Upload the cases to the project's casebase
        #[arg(long)]
        upload: bool,
    },

    /// Create the casebase index for a project's schema
    Mapping {
        /// Project id
        #[arg(short, long)]
        project: String,
    },

    /// Retrieve the most similar cases for a query
    Retrieve {
        /// Project id
        #[arg(short, long)]
        project: String,

        /// Number of cases to return
        #[arg(short = 'k', long, default_value = "5")]
        topk: usize,

        /// Ask the server for per-attribute similarity explanations
        #[arg(long)]
        explain: bool,

        /// Write the returned cases to a CSV file
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Query values as name=value; values are parsed as JSON, else taken as text
        #[arg(value_name = "NAME=VALUE", required = true)]
        values: Vec<String>,
    },

    /// Retain a case in a project's casebase
    Retain {
        /// Project id
        #[arg(short, long)]
        project: String,

        /// Case values as name=value; values are parsed as JSON, else taken as text
        #[arg(value_name = "NAME=VALUE", required = true)]
        values: Vec<String>,
    },

    /// Manage API tokens
    Tokens {
        #[command(subcommand)]
        action: TokenAction,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// List projects on the server
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an empty project
    Create {
        /// Project name
        name: String,

        /// Project description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Keep cases that duplicate existing ones when retaining
        #[arg(long)]
        retain_duplicates: bool,
    },

    /// Delete a project and its casebase
    Delete {
        /// Project id
        id: String,
    },

    /// Write a project's definition to a JSON file
    Export {
        /// Project id
        id: String,

        /// Directory to write clood-<id>.json into
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Create a new project from an exported definition
    Import {
        /// Path to an exported project file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum AttributeAction {
    /// List a project's attributes
    List {
        /// Project id
        #[arg(short, long)]
        project: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add an attribute
    Add {
        /// Project id
        #[arg(short, long)]
        project: String,

        /// Attribute name
        name: String,

        /// Data type (String, Integer, Float, Boolean, Categorical, Date, Location, Ontology Concept, Object)
        #[arg(short = 't', long = "type")]
        attr_type: AttributeType,

        /// Similarity measure (e.g. Equal, "Nearest Number", Table)
        #[arg(short, long)]
        similarity: Similarity,
    },

    /// Remove an attribute
    Remove {
        /// Project id
        #[arg(short, long)]
        project: String,

        /// Attribute name
        name: String,
    },

    /// Set an attribute's similarity parameters
    Configure {
        /// Project id
        #[arg(short, long)]
        project: String,

        /// Attribute name
        name: String,

        #[command(flatten)]
        params: ParamArgs,
    },
}

/// Parameter edits; only the ones that apply to the attribute's similarity are used.
#[derive(Args, Default)]
pub struct ParamArgs {
    /// Lower bound (Interval, McSherry, INRECA)
    #[arg(long)]
    pub min: Option<f64>,

    /// Upper bound (Interval, McSherry, INRECA)
    #[arg(long)]
    pub max: Option<f64>,

    /// Similarity at the boundary (INRECA)
    #[arg(long)]
    pub jump: Option<f64>,

    /// Decay scale: a number, a duration such as 30d, or a distance such as 5km
    #[arg(long)]
    pub scale: Option<String>,

    /// Decay rate in (0, 1]
    #[arg(long)]
    pub decay: Option<f64>,

    /// Declared value to add (Table, EnumDistance); repeatable
    #[arg(long = "value", value_name = "VALUE")]
    pub values: Vec<String>,

    /// Declared value to remove (Table, EnumDistance); repeatable
    #[arg(long = "drop-value", value_name = "VALUE")]
    pub drop_values: Vec<String>,

    /// Make the table symmetric (true) or asymmetric (false)
    #[arg(long)]
    pub symmetric: Option<bool>,

    /// Table cell as QUERY:CASE=SCORE; repeatable
    #[arg(long = "cell", value_name = "QUERY:CASE=SCORE")]
    pub cells: Vec<String>,

    /// Ontology name (Path-based, Feature-based)
    #[arg(long)]
    pub ontology: Option<String>,

    /// Ontology source to add; repeatable
    #[arg(long = "source", value_name = "SOURCE")]
    pub sources: Vec<String>,

    /// Vector dimension (Cosine)
    #[arg(long)]
    pub dimension: Option<usize>,
}

#[derive(Subcommand)]
pub enum TokenAction {
    /// List tokens
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a token; the secret is shown once
    Create {
        /// Token name
        name: String,

        /// Lifetime (90m, 1d, 7d, 30d)
        #[arg(short, long, default_value = "1d")]
        lifetime: TokenLifetime,

        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a token
    Delete {
        /// Token id
        id: String,
    },
}
