//! Built-in sample articles.
//!
//! Last link of the source chain; also used to top up short feeds.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::NewsItem;

struct Sample {
    title: &'static str,
    summary: &'static str,
    url: &'static str,
    source: &'static str,
    category: &'static str,
}

const SAMPLES: [Sample; 5] = [
    Sample {
        title: "Arqueólogos descobrem evidências da época de Jesus na Galileia",
        summary: "Nova descoberta arqueológica na região da Galileia fornece mais evidências sobre o contexto histórico da vida de Jesus Cristo.",
        url: "https://www.gospelprime.com.br/arqueologia-galileia-jesus/",
        source: "Gospel Prime",
        category: "Arqueologia Bíblica",
    },
    Sample {
        title: "Perseguição religiosa atinge níveis recordes mundialmente",
        summary: "Relatório da Portas Abertas revela aumento significativo da perseguição contra cristãos em diversos países.",
        url: "https://www.portasabertas.org.br/noticias/perseguicao-mundial-2024/",
        source: "Portas Abertas",
        category: "Perseguição Religiosa",
    },
    Sample {
        title: "Nova tradução bíblica facilita leitura para jovens brasileiros",
        summary: "Sociedade Bíblica do Brasil lança versão com linguagem contemporânea para alcançar a nova geração de cristãos.",
        url: "https://www.guiame.com.br/biblia-jovens-brasil/",
        source: "Guiame",
        category: "Bíblia e Teologia",
    },
    Sample {
        title: "Igreja brasileira cresce em engajamento social nas comunidades",
        summary: "Pastores e líderes relatam aumento na participação em projetos sociais e de reconciliação em diversas cidades.",
        url: "https://www.gospelprime.com.br/igreja-brasileira-engajamento-social/",
        source: "Gospel Prime",
        category: "Igreja no Brasil",
    },
    Sample {
        title: "Teólogos debatem relevância da fé cristã na era digital",
        summary: "Conferência reúne especialistas para discutir como a igreja pode se adaptar aos desafios da tecnologia moderna.",
        url: "https://www.cristianismohoje.com.br/fe-era-digital/",
        source: "Cristianismo Hoje",
        category: "Teologia Contemporânea",
    },
];

/// The sample articles, all dated `now`.
pub fn sample_items(now: DateTime<Utc>) -> Vec<NewsItem> {
    let date = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    SAMPLES
        .iter()
        .map(|sample| NewsItem {
            title: sample.title.to_string(),
            summary: sample.summary.to_string(),
            url: sample.url.to_string(),
            source: sample.source.to_string(),
            date: date.clone(),
            category: Some(sample.category.to_string()),
            image_url: None,
        })
        .collect()
}
