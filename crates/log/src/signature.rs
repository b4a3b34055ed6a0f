use crate::error::SignatureError;
use std::collections::HashSet;

/// How a declared parameter accepts its argument.
///
/// Variants are ordered the way they must appear in a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKind {
    /// Bound by position or by name, no default.
    Positional,
    /// Bound by position or by name, may be omitted.
    Defaulted,
    /// Absorbs excess positional arguments.
    VarPositional,
    /// Bound by name only.
    KeywordOnly,
    /// Absorbs excess named arguments.
    VarKeyword,
}

impl ParamKind {
    pub fn is_variadic(&self) -> bool {
        matches!(self, ParamKind::VarPositional | ParamKind::VarKeyword)
    }

    /// Whether a value supplied at position `i` lands on this parameter.
    pub fn is_declared_positional(&self) -> bool {
        matches!(self, ParamKind::Positional | ParamKind::Defaulted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    kind: ParamKind,
}

impl Param {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }
}

/// Static description of a function's parameters.
///
/// ```
/// use logtracer::Signature;
///
/// // fn login(user, pw, *args, username=None, password=None, **kwargs)
/// let signature = Signature::new("login")
///     .param("user")
///     .param("pw")
///     .var_positional("args")
///     .keyword_only("username")
///     .keyword_only("password")
///     .var_keyword("kwargs");
///
/// assert_eq!(vec!["user", "pw"], signature.positional_names().collect::<Vec<_>>());
/// assert!(signature.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    name: String,
    params: Vec<Param>,
}

impl Signature {
    pub fn new(name: impl Into<String>) -> Self {
        Signature {
            name: name.into(),
            params: vec![],
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, kind: ParamKind) -> Self {
        self.params.push(Param {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn param(self, name: impl Into<String>) -> Self {
        self.with_param(name, ParamKind::Positional)
    }

    pub fn param_with_default(self, name: impl Into<String>) -> Self {
        self.with_param(name, ParamKind::Defaulted)
    }

    pub fn var_positional(self, name: impl Into<String>) -> Self {
        self.with_param(name, ParamKind::VarPositional)
    }

    pub fn keyword_only(self, name: impl Into<String>) -> Self {
        self.with_param(name, ParamKind::KeywordOnly)
    }

    pub fn var_keyword(self, name: impl Into<String>) -> Self {
        self.with_param(name, ParamKind::VarKeyword)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn positional_names(&self) -> impl Iterator<Item = &str> {
        self.names_where(|kind| kind.is_declared_positional())
    }

    pub fn defaulted_names(&self) -> impl Iterator<Item = &str> {
        self.names_where(|kind| kind == ParamKind::Defaulted)
    }

    pub fn keyword_only_names(&self) -> impl Iterator<Item = &str> {
        self.names_where(|kind| kind == ParamKind::KeywordOnly)
    }

    pub fn has_var_positional(&self) -> bool {
        self.params.iter().any(|p| p.kind == ParamKind::VarPositional)
    }

    pub fn has_var_keyword(&self) -> bool {
        self.params.iter().any(|p| p.kind == ParamKind::VarKeyword)
    }

    pub fn validate(&self) -> Result<(), SignatureError> {
        if self.name.is_empty() {
            return Err(SignatureError::EmptyFunctionName);
        }

        let mut seen = HashSet::new();
        let mut previous: Option<ParamKind> = None;

        for param in &self.params {
            if param.name.is_empty() {
                return Err(SignatureError::EmptyParameterName {
                    function: self.name.clone(),
                });
            }

            if !seen.insert(param.name.as_str()) {
                return Err(SignatureError::DuplicateParameter {
                    function: self.name.clone(),
                    param: param.name.clone(),
                });
            }

            if let Some(previous) = previous {
                if param.kind < previous || (param.kind == previous && param.kind.is_variadic()) {
                    return Err(SignatureError::MisorderedParameter {
                        function: self.name.clone(),
                        param: param.name.clone(),
                        kind: param.kind,
                        previous,
                    });
                }
            }
            previous = Some(param.kind);
        }

        Ok(())
    }

    fn names_where(&self, predicate: impl Fn(ParamKind) -> bool) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .filter(move |p| predicate(p.kind))
            .map(|p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_views() {
        let signature = Signature::new("my_function3")
            .param("usernamearg")
            .param("passwordarg")
            .var_positional("args")
            .keyword_only("username")
            .keyword_only("password")
            .var_keyword("kwargs");

        assert_eq!(
            vec!["usernamearg", "passwordarg"],
            signature.positional_names().collect::<Vec<_>>()
        );
        assert_eq!(
            vec!["username", "password"],
            signature.keyword_only_names().collect::<Vec<_>>()
        );
        assert_eq!(0, signature.defaulted_names().count());
        assert!(signature.has_var_positional());
        assert!(signature.has_var_keyword());
        assert!(signature.validate().is_ok());
    }

    #[test]
    fn test_defaulted_params_are_positional() {
        let signature = Signature::new("my_function4")
            .param("user")
            .param("pw")
            .param_with_default("username")
            .param_with_default("password");

        assert_eq!(
            vec!["user", "pw", "username", "password"],
            signature.positional_names().collect::<Vec<_>>()
        );
        assert_eq!(
            vec!["username", "password"],
            signature.defaulted_names().collect::<Vec<_>>()
        );
        assert!(!signature.has_var_positional());
        assert!(!signature.has_var_keyword());
    }

    #[test]
    fn test_reject_duplicate_parameter() {
        let err = Signature::new("f")
            .param("a")
            .keyword_only("a")
            .validate()
            .unwrap_err();
        assert_eq!(
            SignatureError::DuplicateParameter {
                function: "f".to_string(),
                param: "a".to_string(),
            },
            err
        );
    }

    #[test]
    fn test_reject_positional_after_default() {
        let err = Signature::new("f")
            .param_with_default("a")
            .param("b")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            SignatureError::MisorderedParameter {
                kind: ParamKind::Positional,
                previous: ParamKind::Defaulted,
                ..
            }
        ));
    }

    #[test]
    fn test_reject_second_variadic() {
        let err = Signature::new("f")
            .var_positional("args")
            .var_positional("more")
            .validate()
            .unwrap_err();
        assert!(matches!(err, SignatureError::MisorderedParameter { .. }));
    }

    #[test]
    fn test_reject_anything_after_var_keyword() {
        let err = Signature::new("f")
            .var_keyword("kwargs")
            .keyword_only("late")
            .validate()
            .unwrap_err();
        assert!(matches!(err, SignatureError::MisorderedParameter { .. }));
    }

    #[test]
    fn test_reject_empty_names() {
        assert_eq!(
            SignatureError::EmptyFunctionName,
            Signature::new("").validate().unwrap_err()
        );
        assert!(matches!(
            Signature::new("f").param("").validate(),
            Err(SignatureError::EmptyParameterName { .. })
        ));
    }
}
