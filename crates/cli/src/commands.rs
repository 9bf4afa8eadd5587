//! CLI commands

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use pawhaven_core::pagination::render_window;
use pawhaven_core::{ClientConfig, FileCredentialStore, PageQuery, Paginated, decode_claims};
use pawhaven_http::client::error::ClientError;
use pawhaven_http::types::{
    ArticleListParams, LoginRequest, LostListParams, PetListParams, ShelterListParams,
    TicketListParams, TicketPayload,
};
use pawhaven_http::PawClient;
use serde::Serialize;
use serde_json::json;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the issued tokens
    Login {
        #[arg(short, long)]
        username: String,

        /// Prompted for when omitted
        #[arg(long, env = "PAWHAVEN_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Captcha answer; a fresh captcha is fetched when omitted
        #[arg(long, requires = "uid")]
        captcha: Option<String>,

        /// Id of the captcha being answered
        #[arg(long, requires = "captcha")]
        uid: Option<String>,
    },

    /// Forget the stored tokens
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Pets up for adoption
    Pets {
        #[command(subcommand)]
        command: PetCommands,
    },

    /// Lost pet reports
    Lost {
        #[command(subcommand)]
        command: LostCommands,
    },

    /// Animal shelters
    Shelters {
        #[command(subcommand)]
        command: ShelterCommands,
    },

    /// Blog articles and comments
    Blog {
        #[command(subcommand)]
        command: BlogCommands,
    },

    /// Support tickets
    Tickets {
        #[command(subcommand)]
        command: TicketCommands,
    },

    /// Your notifications
    Notifications {
        #[command(subcommand)]
        command: NotificationCommands,
    },

    /// Foster family applications
    HolidayFamily {
        #[command(subcommand)]
        command: HolidayFamilyCommands,
    },
}

#[derive(Args, Clone, Copy)]
pub struct PageArgs {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Results per page
    #[arg(long, default_value_t = 10)]
    page_size: u32,
}

impl PageArgs {
    fn query(self) -> PageQuery {
        PageQuery::new(self.page, self.page_size)
    }
}

#[derive(Subcommand)]
pub enum PetCommands {
    /// List adoptable pets
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        species: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
    /// Show one pet
    Show { id: u64 },
    /// Apply to adopt a pet
    Apply {
        id: u64,
        /// Note for the owner
        #[arg(short, long)]
        message: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum LostCommands {
    /// List lost pet reports
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one report
    Show { id: u64 },
}

#[derive(Subcommand)]
pub enum ShelterCommands {
    /// List shelters
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Only shelters currently taking animals
        #[arg(long)]
        active: bool,
    },
    /// Show one shelter
    Show { id: u64 },
}

#[derive(Subcommand)]
pub enum BlogCommands {
    /// List articles
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        search: Option<String>,
        /// Category id
        #[arg(long)]
        category: Option<u64>,
    },
    /// Show one article
    Show { id: u64 },
    /// List comments on an article
    Comments {
        id: u64,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand)]
pub enum TicketCommands {
    /// List all tickets visible to you
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        status: Option<String>,
    },
    /// List tickets you opened
    Mine {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Open a ticket
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// `low`, `medium`, `high` or `urgent`
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum NotificationCommands {
    /// List notifications
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Unread notifications and their count
    Unread,
    /// Mark one notification as read
    Read { id: u64 },
    /// Mark every notification as read
    ReadAll,
}

#[derive(Subcommand)]
pub enum HolidayFamilyCommands {
    /// Show your own application
    Mine,
}

impl Commands {
    pub async fn execute(self, config: ClientConfig) -> Result<()> {
        let store = Arc::new(FileCredentialStore::new(&config.storage.credentials_file));
        let client = PawClient::from_config(&config, store)?;

        let result = match self {
            Commands::Login {
                username,
                password,
                captcha,
                uid,
            } => login(&client, username, password, captcha.zip(uid)).await,
            Commands::Logout => {
                client.auth().logout()?;
                eprintln!("Logged out");
                Ok(())
            }
            Commands::Whoami => whoami(&client).await,
            Commands::Pets { command } => command.execute(&client).await,
            Commands::Lost { command } => command.execute(&client).await,
            Commands::Shelters { command } => command.execute(&client).await,
            Commands::Blog { command } => command.execute(&client).await,
            Commands::Tickets { command } => command.execute(&client).await,
            Commands::Notifications { command } => command.execute(&client).await,
            Commands::HolidayFamily { command } => command.execute(&client).await,
        };

        result.map_err(|e| match e.downcast_ref::<ClientError>() {
            Some(client_err) if client_err.is_auth_expired() => {
                e.context("Not logged in or session expired, run `pawhaven login`")
            }
            _ => e,
        })
    }
}

impl PetCommands {
    async fn execute(self, client: &PawClient) -> Result<()> {
        match self {
            PetCommands::List {
                page,
                search,
                species,
                city,
            } => {
                let params = PetListParams {
                    page: Some(page.page),
                    page_size: Some(page.page_size),
                    search,
                    species,
                    city,
                    ..PetListParams::default()
                };
                print_page(&client.pets().list(&params).await?, page)
            }
            PetCommands::Show { id } => print_json(&client.pets().detail(id).await?),
            PetCommands::Apply { id, message } => {
                let response = client.pets().apply(id, message.as_deref()).await?;
                info!(pet = id, application = response.application_id, "Adoption application sent");
                print_json(&response)
            }
        }
    }
}

impl LostCommands {
    async fn execute(self, client: &PawClient) -> Result<()> {
        match self {
            LostCommands::List { page, search } => {
                let params = LostListParams {
                    page: Some(page.page),
                    page_size: Some(page.page_size),
                    search,
                    ..LostListParams::default()
                };
                print_page(&client.lost().list(&params).await?, page)
            }
            LostCommands::Show { id } => print_json(&client.lost().retrieve(id).await?),
        }
    }
}

impl ShelterCommands {
    async fn execute(self, client: &PawClient) -> Result<()> {
        match self {
            ShelterCommands::List { page, active } => {
                let params = ShelterListParams {
                    is_active: active.then_some(true),
                    page: Some(page.page),
                    page_size: Some(page.page_size),
                };
                print_page(&client.shelters().list(&params).await?, page)
            }
            ShelterCommands::Show { id } => print_json(&client.shelters().detail(id).await?),
        }
    }
}

impl BlogCommands {
    async fn execute(self, client: &PawClient) -> Result<()> {
        match self {
            BlogCommands::List {
                page,
                search,
                category,
            } => {
                let params = ArticleListParams {
                    page: Some(page.page),
                    page_size: Some(page.page_size),
                    search,
                    category,
                    ..ArticleListParams::default()
                };
                print_page(&client.blog().articles(&params).await?, page)
            }
            BlogCommands::Show { id } => print_json(&client.blog().article(id).await?),
            BlogCommands::Comments { id, page } => {
                print_page(&client.blog().comments(id, &page.query()).await?, page)
            }
        }
    }
}

impl TicketCommands {
    async fn execute(self, client: &PawClient) -> Result<()> {
        match self {
            TicketCommands::List { page, status } => {
                let params = TicketListParams {
                    page: Some(page.page),
                    page_size: Some(page.page_size),
                    status,
                };
                print_page(&client.tickets().list(&params).await?, page)
            }
            TicketCommands::Mine { page } => {
                print_page(&client.tickets().mine(&page.query()).await?, page)
            }
            TicketCommands::Create {
                title,
                description,
                priority,
                category,
            } => {
                let ticket = TicketPayload {
                    title: Some(title),
                    description: Some(description),
                    priority,
                    category,
                    ..TicketPayload::default()
                };
                print_json(&client.tickets().create(&ticket).await?)
            }
        }
    }
}

impl NotificationCommands {
    async fn execute(self, client: &PawClient) -> Result<()> {
        let notifications = client.notifications();
        match self {
            NotificationCommands::List { page } => {
                print_page(&notifications.list(&page.query()).await?, page)
            }
            NotificationCommands::Unread => {
                let count = notifications.unread_count().await?;
                let unread = notifications.unread().await?;
                print_json(&json!({ "unread_count": count, "results": unread }))
            }
            NotificationCommands::Read { id } => {
                notifications.mark_as_read(id).await?;
                eprintln!("Notification {id} marked as read");
                Ok(())
            }
            NotificationCommands::ReadAll => {
                notifications.mark_all_as_read().await?;
                eprintln!("All notifications marked as read");
                Ok(())
            }
        }
    }
}

impl HolidayFamilyCommands {
    async fn execute(self, client: &PawClient) -> Result<()> {
        match self {
            HolidayFamilyCommands::Mine => {
                print_json(&client.holiday_family().my_application().await?)
            }
        }
    }
}

async fn login(
    client: &PawClient,
    username: String,
    password: Option<String>,
    answer: Option<(String, String)>,
) -> Result<()> {
    let password = password_or_prompt(password, |label| rpassword::prompt_password(label))?;

    let (captcha, uid) = match answer {
        Some(answer) => answer,
        None => {
            let challenge = client.auth().captcha().await?;
            eprintln!("Captcha image: {}", challenge.image);
            (prompt("Captcha: ")?, challenge.uid)
        }
    };

    client
        .auth()
        .login(&LoginRequest {
            username,
            password,
            captcha,
            uid,
        })
        .await?;
    eprintln!("Logged in");
    Ok(())
}

async fn whoami(client: &PawClient) -> Result<()> {
    let Some(access) = client.credentials().access_token()? else {
        bail!("Not logged in, run `pawhaven login`");
    };

    let claims = decode_claims(&access);
    let expires_at = claims
        .as_ref()
        .and_then(|c| c.exp)
        .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0))
        .map(|at| at.to_rfc3339());

    match client.auth().me().await {
        Ok(profile) => print_json(&json!({
            "profile": profile,
            "access_expires_at": expires_at,
        })),
        Err(e) if !e.is_auth_expired() => {
            // the stored token still names the user when the backend is unreachable
            warn!(error = %e, "Could not fetch profile, showing token claims");
            print_json(&json!({
                "user_id": claims.as_ref().and_then(|c| c.user_id),
                "access_expires_at": expires_at,
            }))
        }
        Err(e) => Err(e.into()),
    }
}

/// Use the given password, or read one from the terminal without echo
fn password_or_prompt<F>(password: Option<String>, read_hidden: F) -> Result<String>
where
    F: FnOnce(&str) -> std::io::Result<String>,
{
    if let Some(password) = password {
        return Ok(password);
    }
    let value = read_hidden("Password: ").context("Failed to read password")?;
    if value.is_empty() {
        bail!("Password cannot be empty");
    }
    Ok(value)
}

fn prompt(label: &str) -> Result<String> {
    let mut stderr = std::io::stderr();
    stderr.write_all(label.as_bytes())?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    let value = line.trim().to_string();
    if value.is_empty() {
        bail!("{} cannot be empty", label.trim_end_matches(": "));
    }
    Ok(value)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the page as JSON and the page window on stderr
fn print_page<T: Serialize>(page: &Paginated<T>, args: PageArgs) -> Result<()> {
    print_json(page)?;
    let total = page.total_pages(args.page_size);
    if total > 1 {
        eprintln!("page {}", render_window(args.page, total));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_password_skips_the_terminal() {
        let password = password_or_prompt(Some("hunter2".into()), |_| {
            panic!("terminal must not be read")
        })
        .unwrap();
        assert_eq!(password, "hunter2");
    }

    #[test]
    fn missing_password_is_read_hidden() {
        let mut label = String::new();
        let password = password_or_prompt(None, |prompt| {
            label = prompt.to_string();
            Ok("s3cret".into())
        })
        .unwrap();
        assert_eq!(password, "s3cret");
        assert_eq!(label, "Password: ");
    }

    #[test]
    fn empty_or_unreadable_password_is_rejected() {
        assert!(password_or_prompt(None, |_| Ok(String::new())).is_err());

        let err = password_or_prompt(None, |_| {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no tty"))
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read password"));
    }
}
