mod config;
mod quiz;

use std::{fs::File, sync::Arc};

use config::Config;
use dotenv::dotenv;
use log::{debug, info};
use quiz::{
    catalog::VerbCatalog,
    score::Summary,
    session::{Entry, Progress, QuizSession},
    Section, UserAnswer, Verb,
};
use teloxide::{
    dispatching::dialogue::{ErasedStorage, InMemStorage, Storage},
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup, KeyboardRemove, ParseMode},
    utils::html,
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
type DialogueStorage = std::sync::Arc<ErasedStorage<State>>;

/// One variant per screen: Home, lesson selection, quiz, result.
#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    ReceiveMenuChoice,
    ReceiveSectionChoice,
    Quiz {
        session: QuizSession,
    },
    Finished,
}

/// Everything the handlers share, built once at startup.
pub struct Lessons {
    catalog: VerbCatalog,
    sections: Vec<Section>,
    practice_size: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    pretty_env_logger::init();
    log::info!("Starting irregular verbs bot...");

    let config = Config::from_env()?;
    let catalog = match &config.verbs_file {
        Some(path) => {
            info!("Loading verbs from {}", path.display());
            VerbCatalog::from_reader(File::open(path)?)?
        }
        None => VerbCatalog::builtin()?,
    };
    let sections = catalog.sections(config.section_size);
    info!(
        "Loaded {} verbs in {} lessons of up to {}",
        catalog.len(),
        sections.len(),
        config.section_size
    );

    let lessons = Arc::new(Lessons {
        catalog,
        sections,
        practice_size: config.practice_size,
    });

    let bot = Bot::from_env();
    let storage: DialogueStorage = InMemStorage::<State>::new().erase();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::ReceiveMenuChoice].endpoint(receive_menu_choice))
            .branch(dptree::case![State::ReceiveSectionChoice].endpoint(receive_section_choice))
            .branch(dptree::case![State::Quiz { session }].endpoint(receive_answer))
            .branch(dptree::case![State::Finished].endpoint(receive_result_choice)),
    )
    .dependencies(dptree::deps![storage, lessons])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;

    Ok(())
}

const CHOOSE_LESSON: &str = "Обрати урок";
const RANDOM_PRACTICE: &str = "Випадкові дієслова";
const BACK: &str = "← Назад";
const NEXT_QUESTION: &str = "Наступне питання";
const SEE_RESULT: &str = "Завершити й переглянути оцінку";
const ANOTHER_LESSON: &str = "Пройти інший урок";
const HOME: &str = "На головну";

async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message, lessons: Arc<Lessons>) -> HandlerResult {
    let greeting = format!(
        "Привіт! Я допоможу тобі вивчити {} неправильних дієслів англійської мови. \
        Я показую значення дієслова, а ти пишеш його три форми: V1, V2 і V3.",
        lessons.catalog.len()
    );
    bot.send_message(msg.chat.id, greeting).await?;

    go_home(&bot, &dialogue, &msg).await
}

async fn go_home(bot: &Bot, dialogue: &QuizDialogue, msg: &Message) -> HandlerResult {
    let keyboard = KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(CHOOSE_LESSON)],
        vec![KeyboardButton::new(RANDOM_PRACTICE)],
    ]);
    bot.send_message(msg.chat.id, "Що будемо робити?")
        .reply_markup(keyboard)
        .await?;

    dialogue.update(State::ReceiveMenuChoice).await?;
    Ok(())
}

async fn receive_menu_choice(
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
    lessons: Arc<Lessons>,
) -> HandlerResult {
    match msg.text() {
        Some(CHOOSE_LESSON) => show_sections(&bot, &dialogue, &msg, &lessons).await,
        Some(RANDOM_PRACTICE) => {
            // ThreadRng is not Send, so it must be gone before the next await
            let verbs = {
                let mut rng = rand::thread_rng();
                lessons.catalog.random_practice(lessons.practice_size, &mut rng)
            };
            let title = format!("{} ({})", RANDOM_PRACTICE, verbs.len());
            start_quiz(&bot, &dialogue, &msg, QuizSession::new(title, verbs)).await
        }
        _ => {
            bot.send_message(msg.chat.id, "Будь ласка, обери один з варіантів")
                .await?;
            Ok(())
        }
    }
}

async fn show_sections(
    bot: &Bot,
    dialogue: &QuizDialogue,
    msg: &Message,
    lessons: &Lessons,
) -> HandlerResult {
    let mut rows: Vec<Vec<KeyboardButton>> = lessons
        .sections
        .iter()
        .map(|section| vec![KeyboardButton::new(section.name.clone())])
        .collect();
    rows.push(vec![KeyboardButton::new(BACK)]);

    bot.send_message(msg.chat.id, sections_text(&lessons.sections))
        .reply_markup(KeyboardMarkup::new(rows))
        .await?;

    dialogue.update(State::ReceiveSectionChoice).await?;
    Ok(())
}

async fn receive_section_choice(
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
    lessons: Arc<Lessons>,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Будь ласка, обери урок зі списку")
            .await?;
        return Ok(());
    };
    if text == BACK {
        return go_home(&bot, &dialogue, &msg).await;
    }

    match find_section(&lessons.sections, text) {
        Some(section) => {
            let session = QuizSession::new(section.name.clone(), section.verbs.clone());
            start_quiz(&bot, &dialogue, &msg, session).await
        }
        None => {
            bot.send_message(msg.chat.id, "Будь ласка, обери урок зі списку")
                .await?;
            Ok(())
        }
    }
}

async fn start_quiz(
    bot: &Bot,
    dialogue: &QuizDialogue,
    msg: &Message,
    session: QuizSession,
) -> HandlerResult {
    info!(
        "Chat {} started {:?} with {} verbs",
        msg.chat.id.0,
        session.title(),
        session.len()
    );
    bot.send_message(msg.chat.id, "Почнемо! Пиши кожну форму окремим повідомленням.")
        .reply_markup(KeyboardRemove::new())
        .await?;

    if session.is_empty() {
        return finish(bot, dialogue, msg, session).await;
    }

    bot.send_message(msg.chat.id, question_text(&session))
        .parse_mode(ParseMode::Html)
        .await?;
    dialogue.update(State::Quiz { session }).await?;
    Ok(())
}

async fn receive_answer(
    bot: Bot,
    dialogue: QuizDialogue,
    mut session: QuizSession,
    msg: Message,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Будь ласка, надішли відповідь текстом")
            .await?;
        return Ok(());
    };

    // Feedback is on screen: the only thing that moves the quiz is the button
    if session.feedback().is_some() {
        let next = next_label(&session);
        if text != next {
            debug!("Chat {} sent {:?} while feedback is shown", msg.chat.id.0, text);
            bot.send_message(msg.chat.id, format!("Натисни «{}», щоб продовжити", next))
                .await?;
            return Ok(());
        }

        return match session.advance() {
            Progress::Next(_) => {
                bot.send_message(msg.chat.id, question_text(&session))
                    .parse_mode(ParseMode::Html)
                    .reply_markup(KeyboardRemove::new())
                    .await?;
                dialogue.update(State::Quiz { session }).await?;
                Ok(())
            }
            Progress::Finished => finish(&bot, &dialogue, &msg, session).await,
            Progress::Unanswered => Ok(()),
        };
    }

    let entry = session.enter(text);
    debug!("Chat {}: {:?}", msg.chat.id.0, entry);
    match entry {
        Entry::Pending(form) => {
            bot.send_message(msg.chat.id, format!("Тепер {}:", form.label()))
                .await?;
        }
        Entry::Scored(answer) => {
            let Some(verb) = session.current_verb() else {
                return Ok(());
            };
            let keyboard = KeyboardMarkup::new(vec![vec![KeyboardButton::new(next_label(&session))]]);
            bot.send_message(msg.chat.id, feedback_text(verb, &answer))
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await?;
        }
        Entry::Ignored => return Ok(()),
    }

    dialogue.update(State::Quiz { session }).await?;
    Ok(())
}

async fn finish(
    bot: &Bot,
    dialogue: &QuizDialogue,
    msg: &Message,
    session: QuizSession,
) -> HandlerResult {
    let summary = session.summary();
    info!(
        "Chat {} finished {:?}: {}/{} correct, score {:.1} ({})",
        msg.chat.id.0,
        session.title(),
        summary.correct,
        session.answers().len(),
        summary.score,
        summary.tier
    );

    let keyboard = KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(ANOTHER_LESSON),
        KeyboardButton::new(HOME),
    ]]);
    bot.send_message(msg.chat.id, result_text(&summary))
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;

    dialogue.update(State::Finished).await?;
    Ok(())
}

async fn receive_result_choice(
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
    lessons: Arc<Lessons>,
) -> HandlerResult {
    match msg.text() {
        Some(ANOTHER_LESSON) => show_sections(&bot, &dialogue, &msg, &lessons).await,
        Some(HOME) => go_home(&bot, &dialogue, &msg).await,
        _ => {
            bot.send_message(msg.chat.id, "Будь ласка, обери один з варіантів")
                .await?;
            Ok(())
        }
    }
}

/// Matches a lesson by its button text or by its number.
fn find_section<'a>(sections: &'a [Section], text: &str) -> Option<&'a Section> {
    let text = text.trim();
    sections
        .iter()
        .find(|section| section.name == text || section.id.to_string() == text)
}

fn next_label(session: &QuizSession) -> &'static str {
    if session.is_last() {
        SEE_RESULT
    } else {
        NEXT_QUESTION
    }
}

fn sections_text(sections: &[Section]) -> String {
    let mut text = String::from("Обери урок:\n");
    for section in sections {
        text.push_str(&format!("\n{} ({} дієсл.)", section.name, section.verbs.len()));
    }
    text
}

fn question_text(session: &QuizSession) -> String {
    let meaning = session
        .current_verb()
        .map(|verb| html::escape(&verb.meaning))
        .unwrap_or_default();
    let form = session
        .pending_form()
        .map(|form| form.label())
        .unwrap_or_default();

    format!(
        "<b>{}</b>\nПитання {} з {}\n\nЗначення: <b>«{}»</b>\n\nНапиши {}:",
        html::escape(session.title()),
        session.question_number(),
        session.len(),
        meaning,
        form
    )
}

fn feedback_text(verb: &Verb, answer: &UserAnswer) -> String {
    let expected = html::escape(&verb.forms());
    if answer.is_correct {
        return format!("Правильно! 🎉\n<b>{}</b>", expected);
    }
    format!(
        "Неправильно! ❌\nТвоя відповідь: {} – {} – {}\nПравильно: <b>{}</b>",
        html::escape(&answer.v1),
        html::escape(&answer.v2),
        html::escape(&answer.v3),
        expected
    )
}

fn result_text(summary: &Summary) -> String {
    format!(
        "Тест завершено!\n{}\n\nОцінка: <b>{:.1}</b> з 10\nПравильних відповідей: {}\nНеправильних відповідей: {}",
        summary.tier.cheer(),
        summary.score,
        summary.correct,
        summary.incorrect
    )
}
