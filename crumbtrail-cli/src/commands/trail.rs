//! Trail command implementation.
//!
//! Builds a page context from the arguments, asks the builder whether the
//! page gets a trail and prints it.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::{ArgGroup, Args, ValueEnum};
use crumbtrail::output::OutputFormat;
use crumbtrail::{Database, PageContext, TermLoader, TrailBuilder};

/// Print the breadcrumb trail for a page.
#[derive(Args)]
#[command(group(
    ArgGroup::new("page")
        .required(true)
        .args(["node", "term", "view", "front"]),
))]
pub struct TrailCommand {
    /// Content item page (the raw `node` route parameter)
    #[arg(long, value_name = "ID")]
    pub node: Option<String>,

    /// Taxonomy term page
    #[arg(long, value_name = "ID")]
    pub term: Option<String>,

    /// Listing or search view page
    #[arg(long, value_name = "VIEW_ID")]
    pub view: Option<String>,

    /// The site front page
    #[arg(long)]
    pub front: bool,

    /// Current path (defaults to the page's system path)
    #[arg(long, value_name = "PATH")]
    pub path: Option<String>,

    /// Page title
    #[arg(long)]
    pub title: Option<String>,

    /// Request language
    #[arg(long, value_name = "LANGCODE", default_value = "en")]
    pub lang: String,

    /// Treat the route as administrative
    #[arg(long)]
    pub admin: bool,

    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "text",
        env = "CRUMBTRAIL_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: FormatArg,
}

/// Output format for the trail command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// `Home > Collection > Page`
    Text,
    /// The rendered trail as JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl TrailCommand {
    /// Execute the trail command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let settings = load_configuration(global)?.resolve();
        let db = open_database(global, false)?;

        let context = self.page_context(&db)?;
        let builder = TrailBuilder::new(&settings, &db);

        let applicability = builder.applies(&context)?;
        if !applicability.is_applicable() {
            return Err(CliError::NotApplicable);
        }

        let trail = builder.build(&context, &applicability)?;
        let formatter = OutputFormat::from(self.format).create_formatter(global.verbose);
        println!("{}", formatter.format(&trail.render())?);

        Ok(())
    }

    fn page_context(&self, db: &Database) -> Result<PageContext, CliError> {
        let mut context = if self.front {
            PageContext::front_page()
        } else if let Some(ref node) = self.node {
            PageContext::for_node(node.clone())
        } else if let Some(ref id) = self.term {
            let term = db
                .load_term(id)?
                .ok_or_else(|| CliError::InvalidArguments(format!("Unknown term: {id}")))?;
            PageContext::for_term(term)
        } else if let Some(ref view) = self.view {
            let path = self.path.clone().unwrap_or_else(|| format!("/{view}"));
            PageContext::for_view(view.clone(), path)
        } else {
            return Err(CliError::InvalidArguments(
                "one of --node, --term, --view or --front is required".to_string(),
            ));
        };

        if let Some(ref path) = self.path {
            context.path.clone_from(path);
        }
        if let Some(ref title) = self.title {
            context = context.with_title(title.clone());
        }
        context = context.with_langcode(self.lang.clone());
        if self.admin {
            context = context.admin();
        }

        Ok(context)
    }
}
