/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the poll loop
/// can branch on the failure kind instead of on message text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("Эндпоинт недоступен: {0}")]
    Connectivity(String),

    #[error("Код ответа не 200: {status}")]
    HttpStatus { status: u16 },

    #[error("Сервер вернул невалидный ответ: {0}")]
    Decode(String),

    #[error("Неверный тип данных в ответе API: {0}")]
    UnexpectedType(String),

    #[error("Нет ключа {0} в ответе API")]
    MissingKey(String),

    #[error("Неизвестный статус работы - {0}")]
    UnknownStatus(String),

    #[error("Не удалось отправить сообщение: {0}")]
    Messaging(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the failure is transient and the next cycle may succeed.
    ///
    /// The poll loop records this on its failure log line.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Error::Config(_) | Error::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
