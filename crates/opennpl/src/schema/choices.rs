/// One enumerated value of a choice field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Integer stored in the database and exchanged over the API.
    pub code: i64,
    /// Code used by the source data files.
    pub token: &'static str,
    pub label: &'static str,
}

/// The fixed label set of a choice field.
#[derive(Debug, PartialEq, Eq)]
pub struct ChoiceSet {
    pub name: &'static str,
    pub options: &'static [ChoiceOption],
}

impl ChoiceSet {
    pub fn contains(&self, code: i64) -> bool {
        self.options.iter().any(|option| option.code == code)
    }

    pub fn label(&self, code: i64) -> Option<&'static str> {
        self.options
            .iter()
            .find(|option| option.code == code)
            .map(|option| option.label)
    }

    pub fn codes(&self) -> impl Iterator<Item = i64> + '_ {
        self.options.iter().map(|option| option.code)
    }

    /// Maps a source-file token to its stored code.
    ///
    /// Missing tokens resolve to the `Null` option when the set declares one.
    /// Tokens are compared exactly, then case-insensitively against tokens and
    /// labels, then numerically so that `1` finds `01`.
    pub fn resolve_token(&self, token: &str) -> Option<i64> {
        let token = token.trim();
        if is_missing(token) {
            return self.find(|option| option.token == "Null");
        }

        self.find(|option| option.token == token)
            .or_else(|| {
                self.find(|option| {
                    option.token.eq_ignore_ascii_case(token)
                        || option.label.eq_ignore_ascii_case(token)
                })
            })
            .or_else(|| {
                let numeric = token.parse::<f64>().ok()?;
                self.find(|option| option.token.parse::<f64>().ok() == Some(numeric))
            })
    }

    fn find(&self, predicate: impl Fn(&ChoiceOption) -> bool) -> Option<i64> {
        self.options
            .iter()
            .find(|option| predicate(option))
            .map(|option| option.code)
    }
}

pub(crate) fn is_missing(token: &str) -> bool {
    token.is_empty() || token.eq_ignore_ascii_case("none") || token.eq_ignore_ascii_case("nan")
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code} is not a valid {set} choice")]
pub struct ChoiceError {
    pub set: &'static str,
    pub code: i64,
}

/// Declares a choice enum together with its [`ChoiceSet`].
///
/// The enum serializes as its integer code and refuses codes outside the set.
macro_rules! choice_set {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident = $code:literal, $token:literal, $label:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub enum $name {
            $( $variant, )+
        }

        impl $name {
            pub const SET: $crate::schema::ChoiceSet = $crate::schema::ChoiceSet {
                name: stringify!($name),
                options: &[
                    $(
                        $crate::schema::ChoiceOption { code: $code, token: $token, label: $label },
                    )+
                ],
            };

            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            pub const fn code(self) -> i64 {
                match self {
                    $( $name::$variant => $code, )+
                }
            }

            pub const fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }

            pub fn from_code(code: i64) -> Option<Self> {
                Self::ALL.iter().copied().find(|choice| choice.code() == code)
            }

            pub fn from_token(token: &str) -> Option<Self> {
                Self::SET.resolve_token(token).and_then(Self::from_code)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = $crate::schema::ChoiceError;

            fn try_from(code: i64) -> Result<Self, Self::Error> {
                Self::from_code(code).ok_or($crate::schema::ChoiceError {
                    set: stringify!($name),
                    code,
                })
            }
        }

        impl From<$name> for i64 {
            fn from(choice: $name) -> i64 {
                choice.code()
            }
        }
    };
}

pub(crate) use choice_set;
