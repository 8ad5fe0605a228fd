//! Amendment search filters.
//!
//! Every field is optional. A client keeps one set of filters as its
//! defaults; filters passed to a call are merged over them, field by field,
//! and the caller's value wins. Fields left unset after the merge are not
//! sent at all.

use serde::{Deserialize, Serialize};

use super::transport::Params;

/// Page size used when neither the caller nor the client defaults set `rows`.
pub const DEFAULT_ROWS: u64 = 100;

macro_rules! setters {
    ($($field:ident: $ty:ty),* $(,)?) => {
        $(
            #[must_use]
            pub fn $field(mut self, value: impl Into<$ty>) -> Self {
                self.$field = Some(value.into());
                self
            }
        )*
    };
}

/// Query filters for the amendment search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmendementFilters {
    /// Full-text query (`texteRecherche`)
    pub texte_recherche: Option<String>,
    /// Amendment number (`numAmend`)
    pub num_amend: Option<String>,
    /// Article identifier (`idArticle`)
    pub id_article: Option<String>,
    /// Author identifier (`idAuteur`)
    pub id_auteur: Option<String>,
    /// Legislative dossier identifier (`idDossierLegislatif`)
    pub id_dossier_legislatif: Option<String>,
    /// Examination identifier (`idExamen`)
    pub id_examen: Option<String>,
    /// Several examination identifiers (`idExamens`)
    pub id_examens: Option<String>,
    /// Parliamentary period (`periodeParlementaire`)
    pub periode_parlementaire: Option<String>,
    /// Lower bound of the tabling date (`dateDebut`)
    pub date_debut: Option<String>,
    /// Upper bound of the tabling date (`dateFin`)
    pub date_fin: Option<String>,
    /// Page size (`rows`)
    pub rows: Option<u64>,
    /// 1-based offset of the first row (`start`)
    pub start: Option<u64>,
    /// Outcome filter (`sort`)
    pub sort: Option<String>,
    pub format: Option<String>,
    /// Ordering (`tri`)
    pub tri: Option<String>,
    /// Result layout (`typeRes`)
    pub type_res: Option<String>,
    pub type_document: Option<String>,
}

impl AmendementFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults sent by the amendment client: list layout ordered by position
    /// in the text, pages of [`DEFAULT_ROWS`].
    #[must_use]
    pub fn client_defaults() -> Self {
        Self::new()
            .rows(DEFAULT_ROWS)
            .format("html")
            .tri("ordreTexteasc")
            .type_res("liste")
            .type_document("amendement")
    }

    setters! {
        texte_recherche: String,
        num_amend: String,
        id_article: String,
        id_auteur: String,
        id_dossier_legislatif: String,
        id_examen: String,
        id_examens: String,
        periode_parlementaire: String,
        date_debut: String,
        date_fin: String,
        sort: String,
        format: String,
        tri: String,
        type_res: String,
        type_document: String,
    }

    #[must_use]
    pub fn rows(mut self, rows: u64) -> Self {
        self.rows = Some(rows);
        self
    }

    #[must_use]
    pub fn start(mut self, start: u64) -> Self {
        self.start = Some(start);
        self
    }

    /// Fill every field left unset in `self` from `defaults`.
    #[must_use]
    pub fn merged_over(&self, defaults: &Self) -> Self {
        fn pick(mine: Option<&String>, theirs: Option<&String>) -> Option<String> {
            mine.or(theirs).cloned()
        }

        Self {
            texte_recherche: pick(self.texte_recherche.as_ref(), defaults.texte_recherche.as_ref()),
            num_amend: pick(self.num_amend.as_ref(), defaults.num_amend.as_ref()),
            id_article: pick(self.id_article.as_ref(), defaults.id_article.as_ref()),
            id_auteur: pick(self.id_auteur.as_ref(), defaults.id_auteur.as_ref()),
            id_dossier_legislatif: pick(
                self.id_dossier_legislatif.as_ref(),
                defaults.id_dossier_legislatif.as_ref(),
            ),
            id_examen: pick(self.id_examen.as_ref(), defaults.id_examen.as_ref()),
            id_examens: pick(self.id_examens.as_ref(), defaults.id_examens.as_ref()),
            periode_parlementaire: pick(
                self.periode_parlementaire.as_ref(),
                defaults.periode_parlementaire.as_ref(),
            ),
            date_debut: pick(self.date_debut.as_ref(), defaults.date_debut.as_ref()),
            date_fin: pick(self.date_fin.as_ref(), defaults.date_fin.as_ref()),
            rows: self.rows.or(defaults.rows),
            start: self.start.or(defaults.start),
            sort: pick(self.sort.as_ref(), defaults.sort.as_ref()),
            format: pick(self.format.as_ref(), defaults.format.as_ref()),
            tri: pick(self.tri.as_ref(), defaults.tri.as_ref()),
            type_res: pick(self.type_res.as_ref(), defaults.type_res.as_ref()),
            type_document: pick(self.type_document.as_ref(), defaults.type_document.as_ref()),
        }
    }

    /// Wire parameters, in endpoint order, skipping unset fields.
    #[must_use]
    pub fn to_params(&self) -> Params {
        let fields: [(&'static str, Option<String>); 17] = [
            ("texteRecherche", self.texte_recherche.clone()),
            ("numAmend", self.num_amend.clone()),
            ("idArticle", self.id_article.clone()),
            ("idAuteur", self.id_auteur.clone()),
            ("idDossierLegislatif", self.id_dossier_legislatif.clone()),
            ("idExamen", self.id_examen.clone()),
            ("idExamens", self.id_examens.clone()),
            ("periodeParlementaire", self.periode_parlementaire.clone()),
            ("dateDebut", self.date_debut.clone()),
            ("dateFin", self.date_fin.clone()),
            ("rows", self.rows.map(|rows| rows.to_string())),
            ("start", self.start.map(|start| start.to_string())),
            ("sort", self.sort.clone()),
            ("format", self.format.clone()),
            ("tri", self.tri.clone()),
            ("typeRes", self.type_res.clone()),
            ("typeDocument", self.type_document.clone()),
        ];

        fields
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name, value)))
            .collect()
    }
}
