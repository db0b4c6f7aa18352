use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(big_integer(Movies::Id).primary_key())
                    .col(string(Movies::ImdbId))
                    .col(string(Movies::Title))
                    .col(string(Movies::Director))
                    .col(integer(Movies::Year))
                    .col(string(Movies::Rating))
                    .col(string(Movies::Genres))
                    .col(integer(Movies::Runtime))
                    .col(string(Movies::Country))
                    .col(string(Movies::Language))
                    .col(double(Movies::ImdbScore))
                    .col(big_integer(Movies::ImdbVotes))
                    .col(double(Movies::MetacriticScore))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Actors::Table)
                    .if_not_exists()
                    .col(big_integer(Actors::Id).primary_key())
                    .col(big_integer(Actors::MovieId))
                    .col(string(Actors::ImdbId))
                    .col(string(Actors::Name))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_actors_movie_id")
                            .from(Actors::Table, Actors::MovieId)
                            .to(Movies::Table, Movies::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_actors_movie_id")
                    .table(Actors::Table)
                    .col(Actors::MovieId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Actors::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    ImdbId,
    Title,
    Director,
    Year,
    Rating,
    Genres,
    Runtime,
    Country,
    Language,
    ImdbScore,
    ImdbVotes,
    MetacriticScore,
}

#[derive(DeriveIden)]
enum Actors {
    Table,
    Id,
    MovieId,
    ImdbId,
    Name,
}
