use clap::{Parser, Subcommand};
use mailreach_lib::{DenyList, ProviderPolicy, ValidateOptions};

#[derive(Parser)]
#[command(name = "mailreach-cli", version, about = "Validate e-mail addresses and probe their mailbox over SMTP")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long, global = true)]
    pub stdin: bool,

    /// write report to file (JSON/NDJSON/CSV selon --format)
    #[arg(long, global = true)]
    pub out: Option<String>,

    /// format: human|json|ndjson|csv
    #[arg(long, default_value = "human", global = true)]
    pub format: String,

    /// budget total de la sonde SMTP (ms)
    #[arg(long = "timeout", default_value_t = 5_000, global = true)]
    pub timeout_ms: u64,

    /// désactive la vérification syntaxique
    #[arg(long, global = true)]
    pub no_regex: bool,

    /// désactive la détection des adresses jetables
    #[arg(long, global = true)]
    pub no_fake_check: bool,

    /// port SMTP du serveur MX
    #[arg(long, default_value_t = 25, global = true)]
    pub port: u16,

    /// nom annoncé dans HELO (par défaut le domaine de l'adresse)
    #[arg(long, global = true)]
    pub helo: Option<String>,

    /// enveloppe MAIL FROM (par défaut l'adresse testée)
    #[arg(long = "from", global = true)]
    pub mail_from: Option<String>,

    /// fragment d'hôte MX à ne pas sonder (répétable)
    #[arg(long = "skip-provider", global = true)]
    pub skip_providers: Vec<String>,

    /// sonde aussi les gros fournisseurs (Google, Outlook, Yahoo, ...)
    #[arg(long, global = true)]
    pub no_provider_skip: bool,

    /// domaine jetable supplémentaire (répétable)
    #[arg(long = "disposable", global = true)]
    pub disposable_domains: Vec<String>,

    /// nombre de validations menées en parallèle
    #[arg(long, default_value_t = 4, global = true)]
    pub jobs: usize,

    /// traite les résultats "unknown" comme invalides (code de sortie 2)
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// valide une ou plusieurs adresses
    Validate {
        #[arg(required = true)]
        emails: Vec<String>,
    },
    /// affiche les enregistrements MX d'un domaine
    Mx { domain: String },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    pub fn validate_options(&self) -> ValidateOptions {
        ValidateOptions {
            timeout_ms: self.timeout_ms,
            regex_check: !self.no_regex,
            fake_email_check: !self.no_fake_check,
            port: self.port,
            helo_domain: self.helo.clone(),
            envelope_sender: self.mail_from.clone(),
        }
    }

    pub fn provider_policy(&self) -> ProviderPolicy {
        let base = if self.no_provider_skip {
            ProviderPolicy::none()
        } else {
            ProviderPolicy::default()
        };
        base.with_fragments(&self.skip_providers)
    }

    pub fn deny_list(&self) -> DenyList {
        DenyList::new().with_domains(&self.disposable_domains)
    }
}
