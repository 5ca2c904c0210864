use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Baseline `status_page` table the later column changes build on.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StatusPage::Table)
                    .if_not_exists()
                    .col(pk_auto(StatusPage::Id))
                    .col(string(StatusPage::Slug).not_null().unique_key().to_owned())
                    .col(string(StatusPage::Title).not_null().to_owned())
                    .col(text_null(StatusPage::Description))
                    .col(string(StatusPage::Icon).not_null().to_owned())
                    .col(string_len(StatusPage::Theme, 30).not_null().to_owned())
                    .col(
                        boolean(StatusPage::Published)
                            .default(true)
                            .not_null()
                            .to_owned(),
                    )
                    .col(
                        boolean(StatusPage::SearchEngineIndex)
                            .default(true)
                            .not_null()
                            .to_owned(),
                    )
                    .col(
                        boolean(StatusPage::ShowTags)
                            .default(false)
                            .not_null()
                            .to_owned(),
                    )
                    .col(string_null(StatusPage::Password))
                    .col(
                        timestamp(StatusPage::CreatedDate)
                            .default(Expr::current_timestamp())
                            .not_null()
                            .to_owned(),
                    )
                    .col(
                        timestamp(StatusPage::ModifiedDate)
                            .default(Expr::current_timestamp())
                            .not_null()
                            .to_owned(),
                    )
                    .col(text_null(StatusPage::FooterText))
                    .col(text_null(StatusPage::CustomCss))
                    .col(
                        boolean(StatusPage::ShowPoweredBy)
                            .default(true)
                            .not_null()
                            .to_owned(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StatusPage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StatusPage {
    Table,
    Id,
    Slug,
    Title,
    Description,
    Icon,
    Theme,
    Published,
    SearchEngineIndex,
    ShowTags,
    Password,
    CreatedDate,
    ModifiedDate,
    FooterText,
    CustomCss,
    ShowPoweredBy,
}
