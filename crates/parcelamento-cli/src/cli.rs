use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use parcelamento::StatusChoice;

#[derive(Parser)]
#[command(name = "parcelamento", version)]
#[command(
    about = "Classifica relatórios de situação fiscal por parcelamento na Receita Federal e na PGFN",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Logs detalhados (debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Formato dos logs
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Arquivo de configuração JSON
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Processa um ZIP de relatórios e gera o ZIP com os arquivos renomeados
    Process {
        /// ZIP com os relatórios em PDF
        #[arg(required = true)]
        archive: PathBuf,

        /// ZIP de saída
        #[arg(short, long, default_value = "empresas_renomeadas.zip")]
        output: PathBuf,

        /// Termos de busca por nome de empresa (separados por vírgula, | ou quebra de linha)
        #[arg(short, long)]
        search: Option<String>,

        /// Filtro de parcelamento na Receita Federal (any/sim/nao)
        #[arg(long, default_value = "any")]
        rf: StatusChoice,

        /// Filtro de parcelamento na PGFN (any/sim/nao)
        #[arg(long, default_value = "any")]
        pgfn: StatusChoice,

        /// Grava o relatório completo em JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Número de workers (padrão: configuração ou CPUs disponíveis)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Oculta a barra de progresso
        #[arg(long)]
        no_progress: bool,
    },

    /// Analisa um único PDF e mostra o resultado
    Classify {
        /// Relatório em PDF
        #[arg(required = true)]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
