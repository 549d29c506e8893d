//! Line-oriented front end over a [`DirectoryClient`].

pub mod command;

pub use command::{Command, HELP};

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::clients::DirectoryClient;
use crate::directory::DirectoryError;
use crate::render::render_directory;

const PROMPT: &str = "> ";

/// Reads commands from `input` until it ends or the user quits, writing
/// renderings and messages to `output`.
///
/// Service errors are reported and the loop carries on; only I/O errors on
/// `input`/`output` end it early.
pub async fn run_console<R, W>(client: &DirectoryClient, input: R, output: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    show_directory(client, output).await?;
    write_out(output, PROMPT).await?;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            write_out(output, PROMPT).await?;
            continue;
        }

        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => {
                debug!(?command, "Running console command");
                execute(client, command, output).await?;
            }
            Err(e) => write_out(output, &format!("error: {e}\n")).await?,
        }
        write_out(output, PROMPT).await?;
    }

    Ok(())
}

async fn execute<W>(client: &DirectoryClient, command: Command, output: &mut W) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let outcome: Result<Option<String>, DirectoryError> = match command {
        Command::List => Ok(None),
        Command::Help => return write_out(output, HELP).await,
        Command::Quit => return Ok(()),
        Command::Reload => client
            .load()
            .await
            .map(|count| Some(format!("loaded {count} users"))),
        Command::Edit(id) => client.begin_edit(id).await.map(|_| None),
        Command::Set { field, value } => client.set_field(field, value).await.map(|_| None),
        Command::Save => client
            .save()
            .await
            .map(|user| Some(format!("saved #{}", user.id))),
        Command::Cancel => client.cancel().await.map(|abandoned| {
            Some(match abandoned {
                Some(id) => format!("stopped editing #{id}"),
                None => "nothing to cancel".to_string(),
            })
        }),
        Command::Delete(id) => client
            .delete(id)
            .await
            .map(|()| Some(format!("deleted #{id}"))),
    };

    match outcome {
        Ok(message) => {
            if let Some(message) = message {
                write_out(output, &format!("{message}\n")).await?;
            }
            show_directory(client, output).await
        }
        Err(e) => {
            warn!(error = %e, "Console command failed");
            write_out(output, &format!("error: {e}\n")).await
        }
    }
}

async fn show_directory<W>(client: &DirectoryClient, output: &mut W) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    match client.snapshot().await {
        Ok(state) => write_out(output, &render_directory(&state)).await,
        Err(e) => write_out(output, &format!("error: {e}\n")).await,
    }
}

async fn write_out<W>(output: &mut W, text: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.flush().await
}
