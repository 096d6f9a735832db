use clap::Args;
use jiff::{Span, Timestamp, tz::TimeZone};
use recipes_app::{auth::PgAuthService, permissions::Role};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Identity the token authenticates as
    #[arg(long)]
    subject: String,

    /// Role granted to the token; repeat for several
    #[arg(long = "role", value_parser = parse_role, required = true)]
    roles: Vec<Role>,

    /// Expiry as an RFC 3339 timestamp
    #[arg(long, conflicts_with = "expires_in")]
    token_expires_at: Option<String>,

    /// Expiry relative to now, e.g. `90d` or `12h`
    #[arg(long)]
    expires_in: Option<String>,
}

fn parse_role(value: &str) -> Result<Role, String> {
    Role::new(value).map_err(|error| error.to_string())
}

fn resolve_expiry(
    at: Option<&str>,
    within: Option<&str>,
    now: Timestamp,
) -> Result<Option<Timestamp>, String> {
    let expires_at = match (at, within) {
        (Some(at), _) => at
            .parse::<Timestamp>()
            .map_err(|error| format!("invalid token-expires-at timestamp: {error}"))?,
        (None, Some(within)) => {
            let span = within
                .parse::<Span>()
                .map_err(|error| format!("invalid expires-in duration: {error}"))?;

            now.to_zoned(TimeZone::UTC)
                .checked_add(span)
                .map_err(|error| format!("expires-in is out of range: {error}"))?
                .timestamp()
        }
        (None, None) => return Ok(None),
    };

    if expires_at <= now {
        return Err("token expiry must be in the future".to_string());
    }

    Ok(Some(expires_at))
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let subject = args.subject.trim();

    if subject.is_empty() {
        return Err("subject cannot be empty".to_string());
    }

    let expires_at = resolve_expiry(
        args.token_expires_at.as_deref(),
        args.expires_in.as_deref(),
        Timestamp::now(),
    )?;

    let issued = PgAuthService::new(args.database.connect().await?)
        .issue_api_token(subject, args.roles, expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    let roles: Vec<&str> = issued.metadata.roles.iter().map(Role::as_str).collect();

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("subject: {}", issued.metadata.subject);
    println!("roles: {}", roles.join(","));
    println!(
        "expires_at: {}",
        issued
            .metadata
            .expires_at
            .map_or_else(|| "never".to_string(), |at| at.to_string())
    );
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan as _;

    use super::*;

    fn now() -> Timestamp {
        Timestamp::UNIX_EPOCH + 1_000.hours()
    }

    #[test]
    fn expiry_is_optional() {
        assert_eq!(resolve_expiry(None, None, now()), Ok(None));
    }

    #[test]
    fn absolute_expiry_must_be_rfc3339_and_future() {
        assert!(resolve_expiry(Some("2030-01-01T00:00:00Z"), None, now()).is_ok_and(|v| v.is_some()));
        assert!(resolve_expiry(Some("next tuesday"), None, now()).is_err());
        assert!(resolve_expiry(Some("1970-01-01T00:00:00Z"), None, now()).is_err());
    }

    #[test]
    fn relative_expiry_counts_from_now() {
        assert_eq!(
            resolve_expiry(None, Some("12h"), now()),
            Ok(Some(now() + 12.hours()))
        );
        assert_eq!(
            resolve_expiry(None, Some("2d"), now()),
            Ok(Some(now() + 48.hours()))
        );
        assert!(resolve_expiry(None, Some("soon"), now()).is_err());
    }

    #[test]
    fn roles_are_normalised() {
        assert_eq!(parse_role("superadmin"), Ok(Role::super_admin()));
    }
}
