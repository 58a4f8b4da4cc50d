use anyhow::Result;
use derive_more::Display;
use inquire::{Confirm, CustomType, Select, Text};
use procura::config::AppConfig;
use procura::form::{
    attachment_postback, enforce_max_length, invited_providers_double_click, try_confirm_action,
    Confirmation, Form, MaxLength,
};
use procura::keys::KeyFilter;
use procura::popup::{PopupRegistry, PopupRequest};
use procura::tooltip::{place, Pointer, Scroll};
use procura::utils::input_validation::{Amount, Digits};
use std::path::Path;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

const CONFIG_FILE: &str = "procura.json";

type MenuExit = Option<()>;
const MENU_EXIT: MenuExit = None;
const MENU_LOOP: MenuExit = Some(());

/// Représente un menu texte
trait Menu {
    /// Contenu du menu: None pour quitter, Some(()) pour le relancer.
    fn enter(&mut self) -> Result<MenuExit>;

    /// Lance le menu en boucle, en affichant les erreurs sans quitter.
    fn enter_loop(&mut self) {
        while let Some(result) = self.enter().transpose() {
            if let Err(error) = result {
                eprintln!("Error: {error}");
            }
        }
    }
}

struct App {
    config: AppConfig,
    popups: PopupRegistry,
}

impl Menu for App {
    fn enter(&mut self) -> Result<MenuExit> {
        #[derive(EnumIter, Display)]
        enum Choice {
            #[display("Validate an amount")]
            Amount,
            #[display("Validate a digits-only field")]
            Digits,
            #[display("Open a popup")]
            Popup,
            #[display("Close a popup")]
            ClosePopup,
            #[display("Place the tooltip")]
            Tooltip,
            #[display("Check a key code")]
            Key,
            #[display("Check a text against a maximum length")]
            MaxLength,
            #[display("Upload an attachment")]
            Attachment,
            #[display("Submit the invited providers list")]
            InvitedProviders,
            #[display("Suspend or revoke a tender")]
            Confirm,
            #[display("Quit")]
            Exit,
        }

        let choice = Select::new("What do you want to do?", Choice::iter().collect()).prompt()?;
        let separators = self.config.separators;

        match choice {
            Choice::Amount => {
                let value = Text::new(&format!("Amount ({separators}):")).prompt()?;
                match Amount::parse(&value, &separators) {
                    Ok(amount) => println!("[*] {amount} is valid"),
                    Err(_) => println!("[!] {value:?} is not a valid amount"),
                }
            }

            Choice::Digits => {
                let value = Text::new("Digits:").prompt()?;
                match Digits::try_from(value.as_str()) {
                    Ok(digits) => println!("[*] {digits} is valid"),
                    Err(_) => println!("[!] {value:?} must contain digits only"),
                }
            }

            Choice::Popup => {
                let name = Text::new("Popup name:").prompt()?;
                let url = Text::new("URL:").prompt()?;
                let width = CustomType::<u32>::new("Width (0 for default):").prompt()?;
                let height = CustomType::<u32>::new("Height (0 for default):").prompt()?;
                let fullscreen = Confirm::new("Fullscreen?").with_default(false).prompt()?;

                let mut request = PopupRequest::new(url).with_size(width, height);
                if fullscreen {
                    request = request.fullscreen();
                }
                let window = self.popups.open(&name, request, self.config.screen);
                println!("{}", window.features());
            }

            Choice::ClosePopup => {
                let name = Text::new("Popup name:").prompt()?;
                match self.popups.close(&name) {
                    Some(window) => println!("[*] Closed {name} ({})", window.url),
                    None => println!("[!] No popup named {name}"),
                }
            }

            Choice::Tooltip => {
                let client_x = CustomType::<i64>::new("Pointer X:").prompt()?;
                let client_y = CustomType::<i64>::new("Pointer Y:").prompt()?;
                let top = CustomType::<i64>::new("Scroll top:").with_default(0).prompt()?;
                let left = CustomType::<i64>::new("Scroll left:").with_default(0).prompt()?;
                let position = place(Pointer { client_x, client_y }, Scroll { left, top });
                println!("{}", position.css());
            }

            Choice::Key => {
                let key = CustomType::<u32>::new("Key code:").prompt()?;
                if KeyFilter::no_enter().allows(key) {
                    println!("[*] Key {key} allowed");
                } else {
                    println!("[!] Key {key} cancelled");
                }
            }

            Choice::MaxLength => {
                let max_length = CustomType::<usize>::new("Maximum length:").prompt()?;
                let text = inquire::Editor::new("Text:").prompt()?;
                match enforce_max_length(&text, max_length) {
                    MaxLength::Unchanged => println!("[*] Text fits"),
                    MaxLength::Truncated { text, notice } => {
                        println!("[!] {notice}\n{text}");
                    }
                }
            }

            Choice::Attachment => {
                let file = Text::new("Selected file:").prompt()?;
                let postback = attachment_postback(&file)?;
                println!("{postback}");
            }

            Choice::InvitedProviders => {
                let mut form = Form::default();
                let code = Text::new("Tender code:").prompt()?;
                form.set("txtCodigo", code);
                let submission = invited_providers_double_click(&mut form);
                println!("{}", serde_json::to_string_pretty(&submission)?);
            }

            Choice::Confirm => {
                let action =
                    Select::new("Action:", Confirmation::iter().collect()).prompt()?;
                let warning = Text::new("Warning to show:").prompt()?;
                let ask = |warning: &str| Confirm::new(warning).with_default(false).prompt();
                if try_confirm_action(action, &warning, ask)? {
                    println!("[*] {action} confirmed");
                } else {
                    println!("[*] {action} cancelled");
                }
            }

            Choice::Exit => return Ok(MENU_EXIT),
        }
        Ok(MENU_LOOP)
    }
}

fn main() -> Result<()> {
    simple_logging::log_to_file("./procura.log", log::LevelFilter::Info)?;

    let config = AppConfig::open(Path::new(CONFIG_FILE))?;
    println!("Separators: {}, screen: {}", config.separators, config.screen);
    App {
        config,
        popups: PopupRegistry::default(),
    }
    .enter_loop();
    Ok(())
}
