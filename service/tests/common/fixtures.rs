//! Response bodies shaped like the real endpoints'.

#![allow(dead_code)]

use serde_json::{json, Value};

pub const AMENDEMENT_PATH: &str = "/recherche/query_amendements";
pub const QUESTION_PATH: &str = "/recherche/resultats_questions";

const AMENDEMENT_SCHEMA: &str = "id|numInit|titreDossierLegislatif|urlDossierLegislatif|instance|numAmend|urlAmend|designationArticle|designationAlinea|dateDepot|signataires|sort";

/// Amendment summary page holding amendments `nums`, numbered from `start`.
pub fn amendement_page(total: u64, start: u64, nums: &[u64]) -> Value {
    let rows: Vec<String> = nums
        .iter()
        .map(|num| {
            format!(
                "ID{num}|2302|Projet de loi de finances|/14/dossiers/loi_finances_2015.asp|Séance publique|{num}|/14/amendements/2234/AN/{num}.asp|Article {num}||2014-10-1{}|M. Dupont|Rejeté",
                num % 10
            )
        })
        .collect();

    json!({
        "infoGenerales": {
            "nb_resultats": total.to_string(),
            "debut": start,
            "nb_docs": nums.len().to_string(),
            "description_schema": AMENDEMENT_SCHEMA,
        },
        "data_table": rows,
    })
}

/// Question search page listing questions `nums`, linking to `next` if given.
pub fn question_page(total: u64, nums: &[u64], next: Option<&str>) -> String {
    let rows: String = nums
        .iter()
        .map(|num| {
            format!(
                r#"<tr>
                     <td class="numero"><a href="/q14/14-{num}QE.htm">14-{num}QE</a></td>
                     <td class="auteur">M. Jean Dupont</td>
                     <td class="rubrique">agriculture</td>
                     <td class="dates">Question publiée au JO le : 01/07/2014</td>
                   </tr>"#
            )
        })
        .collect();

    let pagination = next.map_or_else(String::new, |href| {
        format!(r#"<ul class="pagination"><li class="next"><a href="{href}">Suivant</a></li></ul>"#)
    });

    format!(
        r#"<html><body>
             <p class="nombre-resultats">{total} résultats</p>
             <table class="resultats"><tbody>{rows}</tbody></table>
             {pagination}
           </body></html>"#
    )
}
