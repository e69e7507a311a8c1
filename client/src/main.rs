//! `tweetshare-cli` command-line client.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use tweetshare_client::api::DEFAULT_API_URL;
use tweetshare_client::types::{ChangePasswordData, CreateTweetData, LoginData, RegisterData};
use tweetshare_client::{ApiClient, AppState, ClientError, render};

#[derive(Parser)]
#[command(name = "tweetshare-cli", version, about = "Share short messages with chosen users")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// API base URL.
    #[arg(long, env = "TWEETSHARE_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Bearer token from `login` or `register`.
    #[arg(long, env = "TWEETSHARE_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Print raw JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account and print its token.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long, env = "TWEETSHARE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in and print a token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TWEETSHARE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Replace the signed-in user's password.
    ChangePassword {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
    },
    /// Show the signed-in user.
    Me,
    /// List the other registered users.
    Users,
    /// Show one user.
    User { id: Uuid },
    /// Post a tweet, optionally shared with users by id or email.
    Tweet {
        content: String,
        #[arg(long = "share", value_name = "ID_OR_EMAIL")]
        share: Vec<String>,
    },
    /// List your tweets, newest first.
    MyTweets,
    /// List tweets shared with you.
    Shared,
    /// Show one tweet with its recipients.
    Show { id: Uuid },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let mut api = ApiClient::new(&cli.api_url)?;
    let mut state = match cli.token {
        Some(token) => {
            api.set_token(Some(token.clone()));
            AppState::with_token(token)
        }
        None => AppState::default(),
    };
    debug!(api_url = %api.base_url(), signed_in = state.auth.is_authenticated(), "client ready");

    match cli.command {
        Command::Register {
            email,
            name,
            password,
        } => {
            let data = RegisterData {
                email,
                password,
                name,
            };
            state.register(&mut api, &data).await?;
            print_session(&state, cli.json)
        }
        Command::Login { email, password } => {
            state.login(&mut api, &LoginData { email, password }).await?;
            print_session(&state, cli.json)
        }
        Command::ChangePassword { old, new } => {
            let data = ChangePasswordData {
                old_password: old,
                new_password: new,
            };
            let response = state.change_password(&api, &data).await?;
            println!("{}", response.message);
            Ok(())
        }
        Command::Me => {
            state.load_profile(&api).await?;
            if let Some(user) = &state.auth.user {
                emit(cli.json, user, || render::user(user))?;
            }
            Ok(())
        }
        Command::Users => {
            state.load_profile(&api).await?;
            state.load_users(&api).await?;
            let me = state.auth.user.as_ref().map(|user| user.id).unwrap_or_default();
            let others: Vec<_> = state.users.others(me).cloned().collect();
            emit(cli.json, &others, || render::users(&others))
        }
        Command::User { id } => {
            let user = api.user(id).await?;
            emit(cli.json, &user, || render::user(&user))
        }
        Command::Tweet { content, share } => {
            let recipients = resolve_recipients(&mut state, &api, &share).await?;
            let data = CreateTweetData {
                content,
                shared_with_user_ids: recipients,
            };
            let tweet = state.create_tweet(&api, &data).await?;
            emit(cli.json, &tweet, || render::tweet(&tweet))
        }
        Command::MyTweets => {
            state.load_my_tweets(&api).await?;
            let list = &state.tweets.my_tweets;
            emit(cli.json, list, || {
                render::tweets("My tweets", list, "You have not posted anything yet.")
            })
        }
        Command::Shared => {
            state.load_shared_tweets(&api).await?;
            let list = &state.tweets.shared_tweets;
            emit(cli.json, list, || {
                render::tweets("Shared with me", list, "No tweets shared with you yet.")
            })
        }
        Command::Show { id } => {
            let tweet = api.tweet(id).await?;
            emit(cli.json, &tweet, || render::tweet(&tweet))
        }
    }
}

/// Accept recipient UUIDs directly; resolve anything else as an email
/// against the user directory.
async fn resolve_recipients(
    state: &mut AppState,
    api: &ApiClient,
    raw: &[String],
) -> Result<Vec<Uuid>, ClientError> {
    let mut ids = Vec::with_capacity(raw.len());
    for entry in raw {
        if let Ok(id) = Uuid::parse_str(entry.trim()) {
            ids.push(id);
            continue;
        }
        if state.users.users.is_empty() {
            state.load_users(api).await?;
        }
        let user = state.users.by_email(entry).ok_or_else(|| ClientError::Api {
            status: 404,
            code: "not_found".to_owned(),
            message: format!("no user with email {}", entry.trim()),
            trace_id: None,
        })?;
        ids.push(user.id);
    }
    Ok(ids)
}

fn print_session(state: &AppState, json: bool) -> Result<(), ClientError> {
    let (Some(user), Some(token)) = (&state.auth.user, &state.auth.token) else {
        return Ok(());
    };
    if json {
        return emit(true, &serde_json::json!({ "user": user, "access_token": token }), String::new);
    }
    println!("Signed in as {}", render::user(user));
    println!("export TWEETSHARE_TOKEN={token}");
    Ok(())
}

fn emit<T: serde::Serialize>(
    json: bool,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<(), ClientError> {
    if json {
        let body =
            serde_json::to_string_pretty(value).map_err(|err| ClientError::Decode(err.to_string()))?;
        println!("{body}");
    } else {
        println!("{}", text().trim_end());
    }
    Ok(())
}
