use std::path::PathBuf;
use std::sync::{Arc, Weak};

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;
use tokio::sync::oneshot;
use tracing::warn;

use crate::cli::UserShowArgs;
use crate::commands::{avatar, wait_for};
use crate::error::{Outcome, Result};
use crate::output;
use crate::queue::ResponseLoop;
use crate::responses::UsersResponse;
use crate::service::UserService;
use crate::types::User;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Avatar")]
    avatar: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.full_name(),
            email: user.email.clone(),
            avatar: user.avatar.to_string(),
        }
    }
}

pub async fn list(service: &UserService, response_loop: &mut ResponseLoop, page: i64) -> Result<()> {
    let (done, rx) = oneshot::channel();
    service.load_users_with(page, move |outcome| {
        let _ = done.send(outcome.map(|response| print_users(&response)).map_err(Into::into));
    });
    wait_for(response_loop, rx).await
}

fn print_users(response: &UsersResponse) {
    output::print_item(response, |response| {
        output::print_table(&response.data, |user| UserRow::from(user));
        println!("{}", page_footer(response).bright_black());
    });
}

fn page_footer(response: &UsersResponse) -> String {
    format!(
        "page {} of {} ({} users, {} per page)",
        response.page, response.total_pages, response.total, response.per_page
    )
}

pub async fn show(
    service: &Arc<UserService>,
    response_loop: &mut ResponseLoop,
    args: UserShowArgs,
) -> Result<()> {
    let (done, rx) = oneshot::channel();
    UserView::new(Arc::downgrade(service), args.id, args.avatar_out).load(done);
    wait_for(response_loop, rx).await
}

/// Loads one user, prints it, then fetches the avatar.
///
/// Holds only a weak reference to the service; the view never keeps the
/// service alive.
pub struct UserView {
    service: Weak<UserService>,
    user_id: i64,
    avatar_out: Option<PathBuf>,
}

impl UserView {
    pub fn new(service: Weak<UserService>, user_id: i64, avatar_out: Option<PathBuf>) -> Self {
        Self {
            service,
            user_id,
            avatar_out,
        }
    }

    /// Reports on `done` once the user and avatar have been handled. If the
    /// service is gone, `done` is dropped unanswered.
    pub fn load(self, done: oneshot::Sender<Result<()>>) {
        let Some(service) = self.service.upgrade() else {
            return;
        };
        let Self {
            service: weak,
            user_id,
            avatar_out,
        } = self;

        service.load_user_with(user_id, move |outcome| {
            let user = match outcome {
                Ok(response) => response.user,
                Err(e) => {
                    let _ = done.send(Err(e.into()));
                    return;
                }
            };
            // JSON output waits for the avatar so it is a single document.
            if !output::is_json_output() {
                print_user(&user);
            }

            let Some(service) = weak.upgrade() else {
                warn!(user_id, "user service dropped before the avatar request");
                let avatar = AvatarStatus::Unavailable {
                    error: "user service dropped".to_string(),
                };
                print_report(&user, &avatar);
                let _ = done.send(Ok(()));
                return;
            };
            let requested = user.clone();
            service.load_avatar_with(&requested, move |outcome| {
                let report = avatar_status(outcome, avatar_out)
                    .map(|avatar| print_report(&user, &avatar));
                let _ = done.send(report);
            });
        });
    }
}

/// What became of the avatar in `user show`.
#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AvatarStatus {
    /// The request failed; a placeholder stands in.
    Unavailable { error: String },
    /// The bytes are not a recognised image; a placeholder stands in.
    NotAnImage { bytes: usize },
    Saved {
        format: &'static str,
        path: PathBuf,
        bytes: usize,
    },
    Loaded { format: &'static str, bytes: usize },
}

/// The `user show --json` document.
#[derive(Serialize)]
struct UserReport<'a> {
    user: &'a User,
    avatar: &'a AvatarStatus,
}

fn print_user(user: &User) {
    println!("{}", user.full_name().bold());
    println!("Email:  {}", user.email);
    println!("Avatar: {}", user.avatar);
}

fn print_report(user: &User, avatar: &AvatarStatus) {
    output::print_item(&UserReport { user, avatar }, |report| {
        println!("{}", avatar_line(report.avatar));
    });
}

fn avatar_line(avatar: &AvatarStatus) -> String {
    match avatar {
        AvatarStatus::Unavailable { .. } => "Avatar unavailable, showing placeholder".to_string(),
        AvatarStatus::NotAnImage { .. } => {
            "Avatar is not a displayable image, showing placeholder".to_string()
        }
        AvatarStatus::Saved { format, path, .. } => {
            format!("Saved {format} avatar to {}", path.display())
        }
        AvatarStatus::Loaded { format, bytes } => {
            format!("Avatar: {format}, {}", output::format_size(*bytes))
        }
    }
}

/// Avatar failures degrade to a placeholder; only a failed write is an error.
fn avatar_status(outcome: Outcome<Vec<u8>>, avatar_out: Option<PathBuf>) -> Result<AvatarStatus> {
    let bytes = match outcome {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "failed to load avatar");
            return Ok(AvatarStatus::Unavailable {
                error: e.to_string(),
            });
        }
    };

    let Some(format) = avatar::image_kind(&bytes) else {
        return Ok(AvatarStatus::NotAnImage { bytes: bytes.len() });
    };

    match avatar_out {
        Some(path) => {
            avatar::write_avatar(&path, &bytes)?;
            Ok(AvatarStatus::Saved {
                format,
                path,
                bytes: bytes.len(),
            })
        }
        None => Ok(AvatarStatus::Loaded {
            format,
            bytes: bytes.len(),
        }),
    }
}
