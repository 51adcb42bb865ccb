use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailingListError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration key: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Encoding error: {message}")]
    EncodingError { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API responded with status {status}: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("No redirection exist from [{from}] to [{to}]")]
    RedirectionNotFound { from: String, to: String },

    #[error("Decode error: {message}")]
    DecodeError { message: String },

    #[error("{message}: {source}")]
    OperationFailed {
        message: String,
        #[source]
        source: Box<MailingListError>,
    },
}

/// 錯誤類別，對應呼叫端可依賴的封閉集合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Encoding,
    Transport,
    NotFound,
    Decode,
}

impl MailingListError {
    /// 以操作描述包裝原始錯誤，保留原因鏈
    pub fn wrap(message: impl Into<String>, source: MailingListError) -> Self {
        MailingListError::OperationFailed {
            message: message.into(),
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MailingListError::ConfigError { .. }
            | MailingListError::MissingConfigError { .. }
            | MailingListError::InvalidConfigValueError { .. } => ErrorKind::Configuration,
            MailingListError::EncodingError { .. } => ErrorKind::Encoding,
            MailingListError::ApiError(_) | MailingListError::HttpStatusError { .. } => {
                ErrorKind::Transport
            }
            MailingListError::RedirectionNotFound { .. } => ErrorKind::NotFound,
            MailingListError::DecodeError { .. } => ErrorKind::Decode,
            MailingListError::OperationFailed { source, .. } => source.kind(),
        }
    }

    /// 回傳最內層的錯誤（後端原始診斷訊息所在處）
    pub fn root_cause(&self) -> &MailingListError {
        match self {
            MailingListError::OperationFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.root_cause() {
            MailingListError::MissingConfigError { field } => {
                format!("The profile is missing the '{}' setting", field)
            }
            MailingListError::HttpStatusError { status, body } => {
                format!("The mailing list API rejected the request ({}): {}", status, body)
            }
            MailingListError::RedirectionNotFound { from, to } => {
                format!("{} is not a member of {}", to, from)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.root_cause() {
            MailingListError::HttpStatusError { status: 403, .. } => {
                "Check appKey, appSecret and consumerKey, and that the local clock is accurate"
            }
            MailingListError::HttpStatusError { status: 404, .. } => {
                "Check that the domain and mailing list exist on the backend"
            }
            _ => match self.kind() {
                ErrorKind::Configuration => {
                    "Check the mailinglist.<profile>.* settings in the configuration file"
                }
                ErrorKind::Encoding => "Mailing list addresses must look like name@domain",
                ErrorKind::Transport => "Check network connectivity and the configured endpoint",
                ErrorKind::NotFound => "List the current members to see which addresses exist",
                ErrorKind::Decode => "The backend returned an unexpected response format",
            },
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Configuration | ErrorKind::Encoding => 2,
            ErrorKind::NotFound => 3,
            ErrorKind::Transport | ErrorKind::Decode => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, MailingListError>;
