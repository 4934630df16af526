//! Static lookup tables for the marketplace taxonomy.
//!
//! UI categories and subcategories do not line up one-to-one with the
//! category slugs stored in the backend, and stored `state` values are a mix
//! of two-letter codes and full names. These tables bridge both.

/// A user-facing category with its subcategory labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub subcategories: &'static [&'static str],
}

pub const CATEGORIES: &[Category] = &[
    Category {
        id: "acompanhantes",
        name: "Acompanhantes",
        subcategories: &["Mulheres", "Homens", "Trans", "Massagem"],
    },
    Category {
        id: "imoveis",
        name: "Imóveis",
        subcategories: &[
            "Apartamentos",
            "Casas",
            "Aluguel de quartos",
            "Temporada",
            "Terrenos, sítios e fazendas",
            "Comércio e indústria",
        ],
    },
    Category {
        id: "autos",
        name: "Autos e Peças",
        subcategories: &[
            "Carros, vans e utilitários",
            "Motos",
            "Ônibus",
            "Caminhões",
            "Barcos e aeronaves",
            "Autopeças",
        ],
    },
    Category {
        id: "casa",
        name: "Para a sua casa",
        subcategories: &[
            "Móveis",
            "Eletrodomésticos",
            "Materiais de construção",
            "Jardinagem e construção",
            "Cama, mesa e banho",
            "Decoração",
        ],
    },
    Category {
        id: "eletronicos",
        name: "Eletrônicos e Celulares",
        subcategories: &[
            "Celulares e Smartphones",
            "Computadores e Desktops",
            "Notebooks",
            "Videogames",
            "TVs e Vídeo",
            "Áudio",
            "Câmeras",
        ],
    },
    Category {
        id: "empregos",
        name: "Vagas de Emprego",
        subcategories: &[
            "Administrativo",
            "Vendas",
            "Construção",
            "Saúde",
            "TI",
            "Outras Vagas",
        ],
    },
    Category {
        id: "servicos",
        name: "Serviços",
        subcategories: &[
            "Serviços Domésticos",
            "Manutenção",
            "Saúde e Beleza",
            "Informática",
            "Transporte",
            "Turismo",
        ],
    },
    Category {
        id: "musica",
        name: "Música e Hobbies",
        subcategories: &[
            "Instrumentos musicais",
            "Livros e revistas",
            "Antiguidades",
            "Coleções",
        ],
    },
    Category {
        id: "esportes",
        name: "Esportes e Lazer",
        subcategories: &["Ciclismo", "Fitness", "Esportes Aquáticos", "Camping"],
    },
    Category {
        id: "moda",
        name: "Moda e Beleza",
        subcategories: &[
            "Roupas e calçados",
            "Bolsas e acessórios",
            "Beleza e saúde",
            "Relógios e joias",
        ],
    },
    Category {
        id: "infantil",
        name: "Artigos Infantis",
        subcategories: &["Roupas", "Brinquedos", "Carrinhos", "Berços e móveis"],
    },
    Category {
        id: "animais",
        name: "Animais",
        subcategories: &["Cachorros", "Gatos", "Acessórios", "Outros"],
    },
    Category {
        id: "agro",
        name: "Agro e Indústria",
        subcategories: &["Máquinas agrícolas", "Produção rural", "Indústria"],
    },
];

/// Two-letter state code to the full name some rows store instead
pub const STATES: &[(&str, &str)] = &[
    ("SC", "Santa Catarina"),
    ("SP", "São Paulo"),
    ("RJ", "Rio de Janeiro"),
    ("MG", "Minas Gerais"),
    ("RS", "Rio Grande do Sul"),
    ("PR", "Paraná"),
    ("BA", "Bahia"),
    ("PE", "Pernambuco"),
    ("DF", "Distrito Federal"),
];

/// UI category id to the backend category slugs it covers
pub const CATEGORY_SLUGS: &[(&str, &[&str])] = &[
    (
        "autos",
        &[
            "carros-usados",
            "motos-scooters",
            "caminhoes-comerciais",
            "onibus-venda",
            "barcos-lanchas",
            "pecas-acessorios",
            "caravanas-trailers",
        ],
    ),
    (
        "imoveis",
        &[
            "alugar-casa-apartamento",
            "comprar-imovel",
            "aluguel-temporada",
            "lancamentos-imobiliarios",
            "garagens-venda",
            "imoveis-exterior",
            "aluguel-temporada-exterior",
            "terrenos-exterior",
            "pontos-comerciais",
            "terrenos-venda",
            "aluguel-quarto",
            "troca-de-imoveis",
        ],
    ),
    (
        "acompanhantes",
        &[
            "acompanhantes",
            "acompanhantes-trans",
            "acompanhantes-masculinos",
            "mulher-procura-homem",
            "homem-procura-mulher",
            "mulher-procura-mulher",
            "homem-procura-homem",
            "encontros",
            "namoro",
            "amizade",
        ],
    ),
    (
        "casa",
        &[
            "moveis-decoracao",
            "utilidades-domesticas",
            "eletrodomesticos",
            "jardinagem-construcao",
            "materiais-construcao",
            "artesanato",
            "presentes",
        ],
    ),
    (
        "eletronicos",
        &[
            "celulares-acessorios",
            "computadores-perifericos",
            "games-livros-filmes",
            "tv-audio-video",
            "frequencias-radio",
            "telefonia-pabx",
            "copiadoras-impressoras",
        ],
    ),
    (
        "empregos",
        &[
            "vagas-emprego",
            "estagios-trainee",
            "curriculos",
            "cuidador-idosos",
            "empregada-domestica",
            "trabalho-em-casa",
            "servicos-domesticos",
            "babas",
        ],
    ),
    (
        "moda",
        &[
            "roupas-calcados",
            "beleza-saude",
            "joias-relogios",
            "bolsas-malas-mochilas",
        ],
    ),
    ("musica", &["instrumentos-musicais", "cds-dvds-discos"]),
    ("esportes", &["esportes-lazer", "bicicletas-ciclismo"]),
    (
        "animais",
        &[
            "animais-estimacao-venda",
            "adocao-animais",
            "servicos-animais",
        ],
    ),
    (
        "servicos",
        &[
            "servicos-informatica",
            "cursos-idiomas",
            "turismo",
            "traducoes",
            "mudancas-fretes",
            "profissionais-liberais",
            "reformas-manutencao",
            "saude-beleza",
            "esoterismo",
            "outros-servicos",
            "cursos-informatica",
            "cursos-profissionalizantes",
            "aulas-particulares",
            "esportes-danca",
            "musica-teatro",
            "outros-cursos",
        ],
    ),
    (
        "negocios",
        &["equipamentos-profissionais", "negocios-industria"],
    ),
];

/// UI subcategory label to the single backend slug it narrows to
pub const SUBCATEGORY_SLUGS: &[(&str, &str)] = &[
    // Autos
    ("Carros, vans e utilitários", "carros-usados"),
    ("Motos", "motos-scooters"),
    ("Caminhões", "caminhoes-comerciais"),
    ("Ônibus", "onibus-venda"),
    ("Barcos e aeronaves", "barcos-lanchas"),
    ("Autopeças", "pecas-acessorios"),
    // Acompanhantes
    ("Mulheres", "acompanhantes"),
    ("Homens", "acompanhantes-masculinos"),
    ("Trans", "acompanhantes-trans"),
    // Eletronicos
    ("Celulares e Smartphones", "celulares-acessorios"),
    ("Computadores e Desktops", "computadores-perifericos"),
    ("Notebooks", "computadores-perifericos"),
    ("Videogames", "games-livros-filmes"),
    ("TVs e Vídeo", "tv-audio-video"),
    ("Áudio", "tv-audio-video"),
    // Empregos
    ("Outras Vagas", "vagas-emprego"),
];

pub fn find_category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

pub fn category_slugs(id: &str) -> Option<&'static [&'static str]> {
    CATEGORY_SLUGS
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, slugs)| *slugs)
}

pub fn subcategory_slug(label: &str) -> Option<&'static str> {
    SUBCATEGORY_SLUGS
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, slug)| *slug)
}

pub fn state_name(code: &str) -> Option<&'static str> {
    STATES.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

pub fn state_code(name: &str) -> Option<&'static str> {
    STATES.iter().find(|(_, n)| *n == name).map(|(code, _)| *code)
}
