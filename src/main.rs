//! flowgate CLI
//!
//! Evaluates one authorization check against a grant config and a world
//! fixture. Exits 0 when access is granted, 1 when denied, 2 on error.

use clap::{Parser, ValueEnum};
use flowgate::{
    authz::{
        AccessDecision, AccessResolver, ChainedRoleSource, EmbeddedRoleSource, GrantTable,
        MembershipRoleSource, ResourceRef, SharedRoleSource,
    },
    config::load_config,
    store::FixtureSet,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Which project-role source backs the check
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RoleSourceKind {
    /// Role list embedded in the user snapshot
    Embedded,
    /// Relational project-membership table
    Membership,
    /// Embedded first, membership table as fallback
    Chained,
}

/// flowgate - project-scoped authorization checks for workflow platforms
#[derive(Parser, Debug)]
#[command(name = "flowgate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "FLOWGATE_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "FLOWGATE_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Path to the world fixture file (users, sharing records, memberships)
    #[arg(short, long, env = "FLOWGATE_FIXTURES")]
    fixtures: String,

    /// Id of the user to check
    #[arg(short, long)]
    user: String,

    /// Required scope; repeat for several (all must be granted)
    #[arg(short, long = "scope", required = true)]
    scopes: Vec<String>,

    /// Project id the check is about
    #[arg(long, group = "resource")]
    project: Option<String>,

    /// Workflow id the check is about
    #[arg(long, group = "resource")]
    workflow: Option<String>,

    /// Credential id the check is about
    #[arg(long, group = "resource")]
    credential: Option<String>,

    /// Only consult the global role; never fall back to project roles
    #[arg(long)]
    global_only: bool,

    /// Project-role source to consult
    #[arg(long, value_enum, default_value = "embedded")]
    role_source: RoleSourceKind,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Load configuration
    let config = load_config(args.config.as_deref())
        .inspect_err(|e| error!(error = %e, "Failed to load configuration"))?;

    let grants = GrantTable::from_config(&config.grants)
        .inspect_err(|e| error!(error = %e, "Failed to compile grant table"))?;

    // Load the world fixture
    let fixtures = FixtureSet::from_path(&args.fixtures)
        .inspect_err(|e| error!(error = %e, path = %args.fixtures, "Failed to load fixtures"))?;

    let user = fixtures
        .user(&args.user)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("unknown user '{}' in fixtures", args.user))?;

    let sharing = Arc::new(fixtures.sharing_store());
    let roles: SharedRoleSource = match args.role_source {
        RoleSourceKind::Embedded => Arc::new(EmbeddedRoleSource),
        RoleSourceKind::Membership => Arc::new(MembershipRoleSource::new(Arc::new(
            fixtures.membership_store(),
        ))),
        RoleSourceKind::Chained => Arc::new(ChainedRoleSource::new(vec![
            Arc::new(EmbeddedRoleSource),
            Arc::new(MembershipRoleSource::new(Arc::new(
                fixtures.membership_store(),
            ))),
        ])),
    };

    let resolver = AccessResolver::new(grants, roles, sharing);

    let resource = ResourceRef::from_parts(args.project, args.workflow, args.credential);

    match resolver
        .check(&user, &args.scopes, resource.as_ref(), args.global_only)
        .await
    {
        Ok(AccessDecision::Granted) => {
            info!(user = %user.id, "Access granted");
            println!("granted");
            Ok(())
        }
        Ok(AccessDecision::Denied(reason)) => {
            info!(user = %user.id, reason = %reason, "Access denied");
            println!("denied: {}", reason);
            std::process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "Authorization check failed");
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    }
}
