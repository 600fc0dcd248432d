use std::{collections::BTreeMap, fs, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use k8s_openapi::api::rbac::v1::{PolicyRule, RoleRef, Subject};
use kuberole::{
    kubectl, labels::labels_to_list_params, rbac, rbac::RBAC_API_GROUP, KubectlOptions,
};

fn parse_key_val(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got {:?}", s))?;
    Ok((key.to_owned(), value.to_owned()))
}

#[derive(Parser)]
#[clap(version = "0.1.0", author = "Lach")]
struct Opts {
    /// Kubeconfig context to use
    #[clap(long, global = true)]
    context: Option<String>,
    /// Path to kubeconfig
    #[clap(long, global = true)]
    kubeconfig: Option<PathBuf>,
    #[clap(long, short, global = true)]
    namespace: Option<String>,
    #[clap(subcommand)]
    sub: SubCommand,
}

#[derive(Subcommand)]
enum SubCommand {
    /// Manage roles
    #[clap(subcommand)]
    Role(RoleCommand),
    /// Manage role bindings
    #[clap(subcommand)]
    Binding(BindingCommand),
    /// Apply manifest file through kubectl
    Apply { file: PathBuf },
    /// Delete resources declared in manifest file through kubectl
    Delete { file: PathBuf },
}

#[derive(Subcommand)]
enum RoleCommand {
    /// Create role with single rule
    Create {
        name: String,
        #[clap(long = "verb", required = true)]
        verbs: Vec<String>,
        #[clap(long = "resource", required = true)]
        resources: Vec<String>,
        /// Core group is used if none specified
        #[clap(long = "api-group")]
        api_groups: Vec<String>,
        #[clap(long = "label", parse(try_from_str = parse_key_val))]
        labels: Vec<(String, String)>,
        #[clap(long = "annotation", parse(try_from_str = parse_key_val))]
        annotations: Vec<(String, String)>,
    },
    /// Print role as yaml
    Get {
        name: String,
        /// Print json instead
        #[clap(long)]
        json: bool,
    },
    Delete { name: String },
    /// Print names of roles matching labels
    List {
        #[clap(long = "label", parse(try_from_str = parse_key_val))]
        labels: Vec<(String, String)>,
    },
}

#[derive(Subcommand)]
enum BindingCommand {
    /// Bind service accounts to role
    Create {
        name: String,
        #[clap(long)]
        role: String,
        #[clap(long = "service-account", required = true)]
        service_accounts: Vec<String>,
    },
}

async fn role(options: &KubectlOptions, cmd: RoleCommand) -> Result<()> {
    let namespace = options.namespace_or_default();
    match cmd {
        RoleCommand::Create {
            name,
            verbs,
            resources,
            mut api_groups,
            labels,
            annotations,
        } => {
            if api_groups.is_empty() {
                api_groups.push(String::new());
            }
            let rule = PolicyRule {
                verbs,
                api_groups: Some(api_groups),
                resources: Some(resources),
                ..Default::default()
            };
            let role = rbac::prepare_role(
                namespace,
                &name,
                labels.into_iter().collect(),
                annotations.into_iter().collect(),
                vec![rule],
            );
            rbac::create_role(options, &role).await?;
            log::info!("Created role {} in {}", name, namespace);
        }
        RoleCommand::Get { name, json } => {
            let role = rbac::get_role(options, namespace, &name).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&role)?);
            } else {
                print!("{}", serde_yaml::to_string(&role)?);
            }
        }
        RoleCommand::Delete { name } => {
            rbac::delete_role(options, namespace, &name).await?;
            log::info!("Deleted role {} in {}", name, namespace);
        }
        RoleCommand::List { labels } => {
            let labels: BTreeMap<_, _> = labels.into_iter().collect();
            let params = labels_to_list_params(&labels);
            let roles = rbac::list_roles(options, namespace, &params).await?;
            for role in roles {
                if let Some(name) = role.metadata.name {
                    println!("{}", name);
                }
            }
        }
    }
    Ok(())
}

async fn binding(options: &KubectlOptions, cmd: BindingCommand) -> Result<()> {
    let namespace = options.namespace_or_default();
    match cmd {
        BindingCommand::Create {
            name,
            role,
            service_accounts,
        } => {
            let subjects = service_accounts
                .into_iter()
                .map(|account| Subject {
                    kind: "ServiceAccount".to_owned(),
                    name: account,
                    namespace: Some(namespace.to_owned()),
                    ..Default::default()
                })
                .collect();
            let role_ref = RoleRef {
                api_group: RBAC_API_GROUP.to_owned(),
                kind: "Role".to_owned(),
                name: role,
            };
            let binding = rbac::prepare_role_binding(
                namespace,
                &name,
                BTreeMap::new(),
                BTreeMap::new(),
                subjects,
                role_ref,
            );
            rbac::create_role_binding(options, &binding).await?;
            log::info!("Created role binding {} in {}", name, namespace);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts: Opts = Opts::parse();
    let options = KubectlOptions::new(opts.context, opts.kubeconfig, opts.namespace);

    match opts.sub {
        SubCommand::Role(cmd) => role(&options, cmd).await?,
        SubCommand::Binding(cmd) => binding(&options, cmd).await?,
        SubCommand::Apply { file } => {
            let manifest = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            print!("{}", kubectl::kubectl_apply_from_string(&options, &manifest)?);
        }
        SubCommand::Delete { file } => {
            let manifest = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            print!("{}", kubectl::kubectl_delete_from_string(&options, &manifest)?);
        }
    }
    Ok(())
}
