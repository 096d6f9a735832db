use clap::Args;
use jiff::Timestamp;
use recipes_app::{
    auth::{ApiTokenMetadata, PgAuthService},
    permissions::Role,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Only list tokens issued to this subject
    #[arg(long)]
    subject: Option<String>,
}

const HEADER: &str = "token_uuid\tsubject\troles\tstatus\tlast_used_at\texpires_at";

fn status(token: &ApiTokenMetadata, now: Timestamp) -> &'static str {
    if token.revoked_at.is_some() {
        "revoked"
    } else if token.expires_at.is_some_and(|expires_at| expires_at <= now) {
        "expired"
    } else {
        "active"
    }
}

fn row(token: &ApiTokenMetadata, now: Timestamp) -> String {
    let roles: Vec<&str> = token.roles.iter().map(Role::as_str).collect();
    let or_dash = |value: Option<Timestamp>| value.map_or_else(|| "-".to_string(), |v| v.to_string());

    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        token.uuid,
        token.subject,
        roles.join(","),
        status(token, now),
        or_dash(token.last_used_at),
        or_dash(token.expires_at),
    )
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let tokens = PgAuthService::new(args.database.connect().await?)
        .list_api_tokens(args.subject.as_deref())
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found");
        return Ok(());
    }

    let now = Timestamp::now();

    println!("{HEADER}");

    for token in &tokens {
        println!("{}", row(token, now));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan as _;
    use recipes_app::auth::ApiTokenVersion;
    use uuid::Uuid;

    use super::*;

    fn token(expires_at: Option<Timestamp>, revoked_at: Option<Timestamp>) -> ApiTokenMetadata {
        ApiTokenMetadata {
            uuid: Uuid::nil(),
            version: ApiTokenVersion::V1,
            subject: "ada@example.com".to_string(),
            roles: vec![Role::user(), Role::super_admin()],
            created_at: Timestamp::UNIX_EPOCH,
            last_used_at: None,
            expires_at,
            revoked_at,
        }
    }

    #[test]
    fn status_prefers_revocation_over_expiry() {
        let now = Timestamp::UNIX_EPOCH + 10.hours();
        let past = Some(Timestamp::UNIX_EPOCH);
        let future = Some(now + 1.hour());

        assert_eq!(status(&token(None, None), now), "active");
        assert_eq!(status(&token(future, None), now), "active");
        assert_eq!(status(&token(past, None), now), "expired");
        assert_eq!(status(&token(past, past), now), "revoked");
    }

    #[test]
    fn rows_match_the_header() {
        let line = row(&token(None, None), Timestamp::UNIX_EPOCH);

        assert_eq!(line.split('\t').count(), HEADER.split('\t').count());
        assert!(line.contains("\tUser,SuperAdmin\tactive\t-\t-"), "{line}");
    }
}
