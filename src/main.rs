mod assets;
mod config;
mod data;
mod error;
mod gfx;
mod net;
mod ui;
mod window;
use clap::Parser;
use config::ClientConfig;
use error::ClientError;
use gfx::color::Color;
use gfx::glyph::POKEBALL;
use log::{error, info};
use net::{GameApi, GameClient, HttpApi};
use ui::game;
use window::Window;

#[derive(Parser)]
#[clap(version, about)]
struct Cli {
    /// Base URL of the game API
    #[clap(long)]
    api_url: Option<String>,
    /// Base URL that serves /static/images
    #[clap(long)]
    static_url: Option<String>,
    /// Bearer token sent with every API request
    #[clap(long)]
    token: Option<String>,
    #[clap(long)]
    poll_interval_ms: Option<u64>,
    /// Write the resulting settings back to Config.toml
    #[clap(long)]
    save: bool,
    /// Skip the menu and start a fresh game
    #[clap(long)]
    new_game: bool,
}

impl Cli {
    fn apply(&self, config: &mut ClientConfig) {
        if let Some(ref url) = self.api_url {
            config.server.api_url = url.clone();
        }
        if let Some(ref url) = self.static_url {
            config.server.static_url = url.clone();
        }
        if let Some(ref token) = self.token {
            config.server.token = Some(token.clone());
        }
        if let Some(ms) = self.poll_interval_ms {
            config.client.poll_interval_ms = ms;
        }
    }
}

fn message_screen(win: &mut Window, text: &str, color: Color) -> Result<(), ClientError> {
    win.buf.clear(Color::PANEL);
    win.buf.center_text(text, 500, 360, 2, color);
    win.update()
}

async fn start_game(win: &mut Window, config: &ClientConfig, new_game: bool) -> Result<(), ClientError> {
    let api = HttpApi::new(&config.server)?;
    if new_game {
        message_screen(win, "STARTING NEW GAME...", Color::WHITE)?;
        api.start_game().await?;
    } else {
        message_screen(win, "CONNECTING...", Color::WHITE)?;
    }
    let images = assets::spawn_loader(api.clone());
    let mut client = GameClient::new(api, config.client.poll_interval());
    let result = game(win, &mut client, images);
    client.disconnect().ok();
    result
}

fn error_screen(win: &mut Window, err: ClientError) -> Result<(), ClientError> {
    error!("{err}");
    win.buf.clear(Color::PANEL);
    win.buf.center_text(&err.to_string(), 500, 340, 2, Color::DANGER_LIGHT);
    win.buf.center_text("PRESS ANY KEY TO CONTINUE", 500, 700, 1, Color::WARNING);
    win.wait_for_any_key()
}

async fn main_menu(win: &mut Window, config: &ClientConfig) -> Result<(), ClientError> {
    loop {
        win.buf.clear(Color::PANEL);
        win.buf.center_text("PokeTD", 500, 90, 6, Color::GOLD);
        win.buf.center_text("POKEMON TOWER DEFENSE", 500, 160, 2, Color::WHITE);
        win.buf.draw_glyph(&POKEBALL, 468, 210, 8, Color::RED);
        win.buf.draw_text("1.NEW GAME", 380, 330, 2, Color::SKY_TOP);
        win.buf.draw_text("2.CONTINUE GAME", 380, 370, 2, Color::SKY_TOP);
        win.buf.draw_text("3.QUIT", 380, 410, 2, Color::SKY_TOP);
        win.buf.center_text("PRESS KEYS 1 TO 3", 500, 520, 1, Color::WARNING);
        win.buf.center_text(&config.server.api_url, 500, 720, 1, Color::MUTED);
        win.buf.draw_text(env!("CARGO_PKG_VERSION"), 8, 744, 1, Color::MUTED);
        match win.wait_for_number(1..=3)? {
            Some(1) => start_game(win, config, true).await?,
            Some(2) => start_game(win, config, false).await?,
            Some(3) | None => win.quit()?,
            _ => unreachable!("Invalid menu option"),
        }
    }
}

async fn run(win: &mut Window, config: &ClientConfig, new_game: bool) -> Result<(), ClientError> {
    if new_game {
        if let Err(err) = start_game(win, config, true).await {
            if let ClientError::Quit = err {
                return Err(err);
            }
            error_screen(win, err)?;
        }
    }
    loop {
        if let Err(err) = main_menu(win, config).await {
            if let ClientError::Quit = err {
                return Err(err);
            }
            error_screen(win, err)?;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Cli::parse();
    let mut config = ClientConfig::load()?;
    args.apply(&mut config);
    if args.save {
        config.save()?;
    }
    info!(
        "API {} static {} polling every {} ms",
        config.server.api_url, config.server.static_url, config.client.poll_interval_ms
    );
    let win = &mut match Window::new() {
        Ok(win) => win,
        Err(err) => {
            error!("Failed to create window: {err}");
            eprintln!("Failed to create window: {err}");
            return Err(err);
        }
    };
    match run(win, &config, args.new_game).await {
        Ok(()) | Err(ClientError::Quit) => Ok(()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_the_config_file() {
        let args = Cli::parse_from(["poketd", "--api-url", "http://game:9000/api/v1", "--poll-interval-ms", "500"]);
        let mut config = ClientConfig::default();
        config.server.token = Some("kept".to_string());
        args.apply(&mut config);
        assert_eq!(config.server.api_url, "http://game:9000/api/v1");
        assert_eq!(config.server.static_url, "http://localhost:8000");
        assert_eq!(config.server.token.as_deref(), Some("kept"));
        assert_eq!(config.client.poll_interval_ms, 500);
        assert!(!args.save && !args.new_game);
    }
}
