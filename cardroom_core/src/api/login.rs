use super::error::Error;
use serde::{Deserialize, Serialize};

/// The request to sign in: the credentials read from the login form at the
/// moment of submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Req {
    /// Name of the account signing in.
    pub username: String,

    /// Plaintext password for the account.
    pub password: String,
}

/// The envelope the server answers with, whatever its verdict.
#[derive(Debug, Serialize, Deserialize)]
pub struct Resp {
    /// Whether the credentials were accepted.
    pub success: bool,

    /// Why the login was rejected, in words meant for the user. Only
    /// present when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A decoded verdict on a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server accepted the credentials.
    Accepted,

    /// The server rejected the credentials, with a message to show the
    /// user.
    Rejected(String),
}

impl TryFrom<Resp> for Outcome {
    type Error = Error;

    fn try_from(resp: Resp) -> Result<Self, Self::Error> {
        match resp {
            Resp { success: true, .. } => Ok(Self::Accepted),
            Resp {
                success: false,
                message: Some(message),
            } => Ok(Self::Rejected(message)),
            Resp {
                success: false,
                message: None,
            } => Err(Error::MissingReason),
        }
    }
}

/// Where the login endpoint lives.
pub const PATH: &str = "/login";

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn req_serializes_to_exactly_the_two_fields() {
        let req = Req {
            username: "alice".into(),
            password: "secret".into(),
        };

        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"username":"alice","password":"secret"}"#
        );
    }

    #[test]
    fn accepted_needs_no_message() {
        let resp: Resp = serde_json::from_str(r#"{"success":true}"#).unwrap();

        assert_eq!(Outcome::try_from(resp).unwrap(), Outcome::Accepted);
    }

    #[test]
    fn rejected_keeps_the_message() {
        let resp: Resp =
            serde_json::from_str(r#"{"success":false,"message":"bad credentials"}"#).unwrap();

        assert_eq!(
            Outcome::try_from(resp).unwrap(),
            Outcome::Rejected("bad credentials".to_string())
        );
    }

    #[test]
    fn rejected_without_a_message_is_an_error() {
        let resp: Resp = serde_json::from_str(r#"{"success":false}"#).unwrap();

        assert!(matches!(Outcome::try_from(resp), Err(Error::MissingReason)));
    }

    #[test]
    fn a_body_without_a_verdict_does_not_decode() {
        assert!(serde_json::from_str::<Resp>(r#"{"message":"hi"}"#).is_err());
    }

    #[test]
    fn an_accepted_verdict_serializes_without_a_message_key() {
        let resp = Resp {
            success: true,
            message: None,
        };

        assert_eq!(serde_json::to_string(&resp).unwrap(), r#"{"success":true}"#);
    }

    proptest! {
        #[test]
        fn req_body_always_has_exactly_the_two_keys(username in ".*", password in ".*") {
            let req = Req {
                username: username.clone(),
                password: password.clone(),
            };

            let body = serde_json::to_value(&req).unwrap();
            let object = body.as_object().unwrap();

            prop_assert_eq!(object.len(), 2);
            prop_assert_eq!(object["username"].as_str(), Some(username.as_str()));
            prop_assert_eq!(object["password"].as_str(), Some(password.as_str()));
        }
    }
}
