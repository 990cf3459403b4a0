use anyhow::{Result, bail};
use mailreach_lib::{MxError, MxStatus, check_mx};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct MxSummary {
    pub domain: String,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub status: Option<MxStatus>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub best: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}

impl MxSummary {
    pub fn from_status(domain: &str, status: MxStatus) -> Self {
        let best = status.best().map(|r| r.exchange.clone());
        Self {
            domain: domain.to_string(),
            status: Some(status),
            best,
            error: None,
        }
    }

    pub fn from_error(domain: &str, error: &MxError) -> Self {
        Self {
            domain: domain.to_string(),
            status: None,
            best: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_dead(&self) -> bool {
        !matches!(self.status, Some(MxStatus::Records(_)))
    }

    pub fn human_summary(&self) -> String {
        match (&self.status, &self.error) {
            (Some(MxStatus::Records(records)), _) => {
                let mut out = format!("{}:", self.domain);
                for r in records {
                    out.push_str(&format!("\n  {:>5} {}", r.priority, r.exchange));
                }
                if let Some(best) = &self.best {
                    out.push_str(&format!("\n  best: {best}"));
                }
                out
            }
            (Some(MxStatus::NoRecords), _) => format!("{}: no MX records", self.domain),
            (None, Some(error)) => format!("{}: error: {error}", self.domain),
            (None, None) => format!("{}: unknown", self.domain),
        }
    }
}

pub fn resolve(domain: &str) -> MxSummary {
    match check_mx(domain) {
        Ok(status) => MxSummary::from_status(domain, status),
        Err(err) => MxSummary::from_error(domain, &err),
    }
}

pub fn print(summary: &MxSummary, format: &str) -> Result<()> {
    match format {
        "human" => println!("{}", summary.human_summary()),
        #[cfg(feature = "with-serde")]
        "json" => println!("{}", serde_json::to_string_pretty(summary)?),
        #[cfg(feature = "with-serde")]
        "ndjson" => println!("{}", serde_json::to_string(summary)?),
        other => bail!("format '{other}' non supporté pour la sous-commande mx"),
    }
    Ok(())
}
