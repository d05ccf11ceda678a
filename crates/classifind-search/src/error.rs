use classifind_catalog::CatalogError;
use thiserror::Error;

/// Terminal failure of one search operation.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The request was rejected before any remote call.
    #[error("invalid input: {0}")]
    Input(String),

    /// The address could not be turned into coordinates.
    #[error("location not found: {0}")]
    Geocoding(String),

    /// The device position could not be obtained.
    #[error("device location unavailable: {0}")]
    Location(String),

    #[error("catalog request failed: {0}")]
    Network(#[from] CatalogError),

    /// Every tier completed and none returned a listing.
    #[error("no results for {0}")]
    NoResults(String),

    /// A newer operation started before this one finished; its result must
    /// not be displayed.
    #[error("search superseded by a newer request")]
    Superseded,
}

impl SearchError {
    /// Short notification text for the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Input(reason) => format!("Busca inválida: {reason}"),
            Self::Geocoding(_) => "Local não encontrado".to_string(),
            Self::Location(_) => "Não foi possível obter sua localização".to_string(),
            Self::Network(_) => "Falha ao buscar produtos. Tente novamente.".to_string(),
            Self::NoResults(label) => format!("Nenhum produto encontrado em {label}"),
            Self::Superseded => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_are_localized() {
        assert_eq!(
            SearchError::Geocoding("rua x".into()).user_message(),
            "Local não encontrado"
        );
        assert_eq!(
            SearchError::NoResults("País: BR".into()).user_message(),
            "Nenhum produto encontrado em País: BR"
        );
    }

    #[test]
    fn catalog_errors_convert_to_network() {
        let err: SearchError = CatalogError::Api("down".into()).into();
        assert!(matches!(err, SearchError::Network(CatalogError::Api(_))));
        assert!(err.to_string().contains("down"));
    }
}
